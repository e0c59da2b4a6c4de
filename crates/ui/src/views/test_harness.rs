use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assesify_core::model::{
    AnswerMatch, ClassId, ClassSummary, CreatedClass, JoinedClass, Question, QuizId, QuizListing,
    QuizSubmission, SubmitReceipt, User, UserId,
};
use assesify_core::time::fixed_clock;
use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AccessToken, ApiClient, ApiConfig, ApiError, AuthService, ClassGateway, ClassService,
    QuizGateway, QuizService, SessionContext,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{DashboardView, ProfileView, QuizView, TeacherView};

/// Quiz backend with canned questions that records fetches and submissions.
#[derive(Default)]
pub struct FakeGateway {
    pub questions: Vec<Question>,
    /// Per-quiz questions; quizzes not listed get `questions`.
    pub by_quiz: Vec<(QuizId, Vec<Question>)>,
    pub fetched: Mutex<Vec<QuizId>>,
    pub listings: Vec<QuizListing>,
    pub submit_delay: Option<Duration>,
    pub submitted: Mutex<Vec<QuizSubmission>>,
}

#[async_trait]
impl QuizGateway for FakeGateway {
    async fn fetch_questions(&self, quiz_id: QuizId) -> Result<Vec<Question>, ApiError> {
        self.fetched.lock().unwrap().push(quiz_id);
        let questions = self
            .by_quiz
            .iter()
            .find(|(id, _)| *id == quiz_id)
            .map_or_else(|| self.questions.clone(), |(_, questions)| questions.clone());
        Ok(questions)
    }

    async fn submit(&self, submission: &QuizSubmission) -> Result<SubmitReceipt, ApiError> {
        if let Some(delay) = self.submit_delay {
            tokio::time::sleep(delay).await;
        }
        self.submitted.lock().unwrap().push(submission.clone());
        Ok(SubmitReceipt {
            streak: Some(6),
            diamonds_earned: Some(2),
            ..SubmitReceipt::default()
        })
    }

    async fn recent_quizzes(&self) -> Result<Vec<QuizListing>, ApiError> {
        Ok(self.listings.clone())
    }
}

/// Class backend with canned classes that records what was created and invited.
#[derive(Default)]
pub struct FakeClassGateway {
    pub classes: Vec<ClassSummary>,
    pub created: Mutex<Vec<(String, Option<String>)>>,
    pub invited: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ClassGateway for FakeClassGateway {
    async fn list_classes(&self) -> Result<Vec<ClassSummary>, ApiError> {
        Ok(self.classes.clone())
    }

    async fn join_class(&self, code: &str) -> Result<JoinedClass, ApiError> {
        Err(ApiError::Status {
            status: 404,
            message: format!("Invalid class code {code}"),
        })
    }

    async fn create_class(
        &self,
        name: &str,
        section: Option<&str>,
    ) -> Result<CreatedClass, ApiError> {
        self.created
            .lock()
            .unwrap()
            .push((name.to_string(), section.map(str::to_string)));
        Ok(CreatedClass {
            id: ClassId::new(9),
            code: "XYZ789".into(),
        })
    }

    async fn invite_student(
        &self,
        email: &str,
        full_name: &str,
    ) -> Result<Option<String>, ApiError> {
        self.invited
            .lock()
            .unwrap()
            .push((email.to_string(), full_name.to_string()));
        Ok(Some("Invitation sent".into()))
    }
}

#[derive(Clone)]
struct TestApp {
    session: Arc<SessionContext>,
    auth: Arc<AuthService>,
    classes: Arc<ClassService>,
    quizzes: Arc<QuizService>,
}

impl UiApp for TestApp {
    fn session(&self) -> Arc<SessionContext> {
        Arc::clone(&self.session)
    }

    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn classes(&self) -> Arc<ClassService> {
        Arc::clone(&self.classes)
    }

    fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Profile,
    Quiz(String),
    Teacher,
}

/// The quiz id the routed page is showing, settable from a test.
#[derive(Clone, Default)]
pub struct QuizRouteHandle(Rc<RefCell<Option<Signal<String>>>>);

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: QuizTestHandles,
    quiz_route: QuizRouteHandle,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    use_context_provider(|| props.quiz_handles.clone());
    use_context_provider(|| props.quiz_route.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::Quiz(id) => rsx! { QuizRoute { initial: id } },
        ViewKind::Teacher => rsx! { TeacherView {} },
    }
}

#[component]
fn QuizRoute(initial: String) -> Element {
    let route = use_context::<QuizRouteHandle>();
    let id = use_signal(|| initial);
    use_hook(|| route.0.replace(Some(id)));
    rsx! { QuizView { id: id() } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub gateway: Arc<FakeGateway>,
    pub classes: Arc<FakeClassGateway>,
    pub session: Arc<SessionContext>,
    pub quiz_handles: QuizTestHandles,
    pub quiz_route: QuizRouteHandle,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until `needle` shows up, or give up after a few rounds.
    pub async fn drive_until(&mut self, needle: &str) -> String {
        for _ in 0..20 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Point the quiz page at another id, as following a link would.
    pub fn open_quiz(&mut self, id: &str) {
        let Some(mut route) = *self.quiz_route.0.borrow() else {
            panic!("harness is not showing a quiz");
        };
        let id = id.to_string();
        self.dom.in_runtime(|| route.set(id));
        drive_dom(&mut self.dom);
    }

    pub fn dispatch(&mut self, intent: crate::vm::QuizIntent) {
        let dispatch = self.quiz_handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn monica() -> User {
    User {
        id: UserId::new(3),
        full_name: "Monica Geller".into(),
        email: Some("monica@friends.com".into()),
        is_teacher: false,
    }
}

pub fn ross() -> User {
    User {
        id: UserId::new(4),
        full_name: "Ross Geller".into(),
        email: Some("ross@friends.com".into()),
        is_teacher: true,
    }
}

pub async fn setup_view_harness(view: ViewKind, gateway: FakeGateway) -> ViewHarness {
    build_view_harness(view, monica(), gateway, FakeClassGateway::default()).await
}

pub async fn setup_teacher_harness(classes: FakeClassGateway) -> ViewHarness {
    build_view_harness(ViewKind::Teacher, ross(), FakeGateway::default(), classes).await
}

async fn build_view_harness(
    view: ViewKind,
    user: User,
    gateway: FakeGateway,
    classes: FakeClassGateway,
) -> ViewHarness {
    let storage = Storage::in_memory();
    let session = Arc::new(SessionContext::new(Arc::clone(&storage.local), fixed_clock()));
    session
        .sign_in(AccessToken::new("token"), Some(user))
        .await
        .expect("sign in");

    // Nothing listens here; profile calls fail fast.
    let config = ApiConfig::new("http://127.0.0.1:9/api")
        .expect("config")
        .with_timeout(Duration::from_millis(200));
    let api = ApiClient::new(&config, Arc::clone(&session)).expect("api client");
    let gateway = Arc::new(gateway);
    let classes = Arc::new(classes);
    let quizzes = Arc::new(QuizService::new(
        fixed_clock(),
        AnswerMatch::Exact,
        gateway.clone(),
        Arc::clone(&session),
    ));

    let app = Arc::new(TestApp {
        session: Arc::clone(&session),
        auth: Arc::new(AuthService::new(api)),
        classes: Arc::new(ClassService::new(classes.clone())),
        quizzes,
    });
    let quiz_handles = QuizTestHandles::default();
    let quiz_route = QuizRouteHandle::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
            quiz_route: quiz_route.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        gateway,
        classes,
        session,
        quiz_handles,
        quiz_route,
    }
}
