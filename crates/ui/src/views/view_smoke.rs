use std::time::Duration;

use assesify_core::model::{ClassId, ClassSummary, Question, QuizId, QuizListing};

use super::test_harness::{
    FakeClassGateway, FakeGateway, ViewKind, setup_teacher_harness, setup_view_harness,
};
use crate::vm::QuizIntent;

fn three_questions() -> Vec<Question> {
    vec![
        Question::new(
            "What is the powerhouse of the cell?",
            vec!["Nucleus".into(), "Mitochondria".into()],
            "Mitochondria",
            "Mitochondria produce ATP.",
            None,
        )
        .unwrap(),
        Question::new(
            "Plants make food by photosynthesis.",
            Vec::new(),
            "True",
            "Chlorophyll captures light.",
            Some("Think of leaves.".into()),
        )
        .unwrap(),
        Question::new(
            "Which carries genetic code?",
            vec!["DNA".into(), "ATP".into()],
            "DNA",
            "DNA stores genetic information.",
            None,
        )
        .unwrap(),
    ]
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_not_found_for_empty_quiz() {
    let mut harness = setup_view_harness(ViewKind::Quiz("999".into()), FakeGateway::default()).await;
    harness.rebuild();
    let html = harness.drive_until("No Quiz Found").await;
    assert!(html.contains("No Quiz Found"), "missing empty state in {html}");
    assert!(html.contains("Return Home"), "missing return action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_not_found_for_bad_id() {
    let gateway = FakeGateway {
        questions: three_questions(),
        ..FakeGateway::default()
    };
    let mut harness = setup_view_harness(ViewKind::Quiz("abc".into()), gateway).await;
    harness.rebuild();
    let html = harness.drive_until("No Quiz Found").await;
    assert!(html.contains("No Quiz Found"), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let gateway = FakeGateway {
        questions: three_questions(),
        ..FakeGateway::default()
    };
    let mut harness = setup_view_harness(ViewKind::Quiz("1".into()), gateway).await;
    harness.rebuild();
    let html = harness.drive_until("powerhouse").await;
    assert!(html.contains("What is the powerhouse of the cell?"), "missing prompt in {html}");
    assert!(html.contains("Mitochondria"), "missing option in {html}");
    assert!(html.contains("Check"), "missing check button in {html}");
    assert!(html.contains("width: 5%"), "missing minimum progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_reloads_when_the_route_id_changes() {
    let chloroplast = Question::new(
        "Which organelle contains chlorophyll?",
        vec!["Chloroplast".into(), "Ribosome".into()],
        "Chloroplast",
        "Chloroplasts capture light.",
        None,
    )
    .unwrap();
    let gateway = FakeGateway {
        by_quiz: vec![
            (QuizId::new(1), three_questions()),
            (QuizId::new(2), vec![chloroplast]),
        ],
        ..FakeGateway::default()
    };
    let mut harness = setup_view_harness(ViewKind::Quiz("1".into()), gateway).await;
    harness.rebuild();
    let html = harness.drive_until("powerhouse").await;
    assert!(html.contains("What is the powerhouse of the cell?"), "missing prompt in {html}");

    harness.open_quiz("2");
    let html = harness.drive_until("organelle contains").await;
    assert!(html.contains("Which organelle contains chlorophyll?"), "stale quiz in {html}");
    assert!(!html.contains("powerhouse"), "first quiz still shown in {html}");
    assert_eq!(
        *harness.gateway.fetched.lock().unwrap(),
        vec![QuizId::new(1), QuizId::new(2)]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_plays_to_completion_and_submits_once() {
    let gateway = FakeGateway {
        questions: three_questions(),
        ..FakeGateway::default()
    };
    let mut harness = setup_view_harness(ViewKind::Quiz("1".into()), gateway).await;
    harness.rebuild();
    harness.drive_until("powerhouse").await;

    harness.dispatch(QuizIntent::Select("Mitochondria".into()));
    harness.dispatch(QuizIntent::Check);
    let html = harness.render();
    assert!(html.contains("Correct!"), "missing feedback in {html}");
    assert!(html.contains("Mitochondria produce ATP."), "missing explanation in {html}");
    assert!(html.contains("Continue"), "missing continue in {html}");
    harness.dispatch(QuizIntent::Continue);

    let html = harness.render();
    assert!(html.contains("Hint: Think of leaves."), "missing hint in {html}");
    assert!(html.contains("False"), "missing fallback option in {html}");
    harness.dispatch(QuizIntent::Select("False".into()));
    harness.dispatch(QuizIntent::Check);
    assert!(harness.render().contains("Incorrect"));
    harness.dispatch(QuizIntent::Continue);

    harness.dispatch(QuizIntent::Select("DNA".into()));
    harness.dispatch(QuizIntent::Check);
    harness.dispatch(QuizIntent::Continue);
    // Extra input after completion is ignored.
    harness.dispatch(QuizIntent::Continue);

    let html = harness.drive_until("Streak").await;
    assert!(html.contains("Lesson Complete!"), "missing completion in {html}");
    assert!(html.contains("+ 20"), "missing xp in {html}");
    assert!(html.contains("2/3"), "missing correct count in {html}");
    assert!(html.contains("Streak: 6"), "missing receipt in {html}");

    let submitted = harness.gateway.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].quiz_id, QuizId::new(1));
    assert_eq!(submitted[0].answers.len(), 3);
    assert_eq!(submitted[0].answers[1].answer, "False");
    assert!(!submitted[0].answers[1].is_correct);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_submission_finishes_after_leaving_the_page() {
    let gateway = FakeGateway {
        questions: three_questions().into_iter().take(1).collect(),
        submit_delay: Some(Duration::from_millis(100)),
        ..FakeGateway::default()
    };
    let mut harness = setup_view_harness(ViewKind::Quiz("1".into()), gateway).await;
    harness.rebuild();
    harness.drive_until("powerhouse").await;

    harness.dispatch(QuizIntent::Select("Mitochondria".into()));
    harness.dispatch(QuizIntent::Check);
    harness.dispatch(QuizIntent::Continue);
    assert!(harness.render().contains("Lesson Complete!"));

    let gateway = harness.gateway.clone();
    drop(harness);

    for _ in 0..50 {
        if !gateway.submitted.lock().unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let submitted = gateway.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].answers.len(), 1);
    assert!(submitted[0].answers[0].is_correct);
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_lists_recent_quizzes() {
    let gateway = FakeGateway {
        listings: vec![QuizListing {
            id: QuizId::new(1),
            title: "Cell basics".into(),
            topic: Some("Biology".into()),
            questions_count: 3,
        }],
        ..FakeGateway::default()
    };
    let mut harness = setup_view_harness(ViewKind::Dashboard, gateway).await;
    harness.rebuild();
    let html = harness.drive_until("Cell basics").await;
    assert!(html.contains("Welcome back, Monica!"), "missing greeting in {html}");
    assert!(html.contains("Cell basics"), "missing quiz in {html}");
    assert!(html.contains("3 questions"), "missing count in {html}");
    assert!(html.contains("Join"), "missing join form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_falls_back_to_cached_user() {
    let mut harness = setup_view_harness(ViewKind::Profile, FakeGateway::default()).await;
    harness.rebuild();
    let html = harness.drive_until("Monica Geller").await;
    assert!(html.contains("Monica Geller"), "missing name in {html}");
    assert!(html.contains("Student"), "missing role in {html}");
    assert!(harness.session.is_signed_in());
}

#[tokio::test(flavor = "current_thread")]
async fn teacher_view_smoke_lists_classes_with_join_codes() {
    let classes = FakeClassGateway {
        classes: vec![
            ClassSummary {
                id: ClassId::new(1),
                name: "Biology".into(),
                section: Some("A".into()),
                teacher: Some("Ross Geller".into()),
                code: Some("BIO123".into()),
                progress: 40,
            },
            ClassSummary {
                id: ClassId::new(2),
                name: "Paleontology".into(),
                section: None,
                teacher: None,
                code: None,
                progress: 0,
            },
        ],
        ..FakeClassGateway::default()
    };
    let mut harness = setup_teacher_harness(classes).await;
    harness.rebuild();
    let html = harness.drive_until("Biology").await;
    assert!(html.contains("Teacher Dashboard"), "missing heading in {html}");
    assert!(html.contains("Signed in as Ross."), "missing teacher name in {html}");
    assert!(html.contains("Code: BIO123"), "missing join code in {html}");
    assert!(html.contains("Paleontology"), "missing second class in {html}");
    assert!(html.contains("Create Class"), "missing create form in {html}");
    assert!(html.contains("Send Invite"), "missing invite form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn teacher_view_smoke_shows_empty_state() {
    let mut harness = setup_teacher_harness(FakeClassGateway::default()).await;
    harness.rebuild();
    let html = harness.drive_until("No classes yet").await;
    assert!(html.contains("Create your first class"), "missing empty state in {html}");
    assert!(harness.classes.created.lock().unwrap().is_empty());
}
