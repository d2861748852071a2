use anyhow::Result;
use divina::{
    flow::{AuthFlowController, AuthMode, FlowConfig, LogNotifier, Notice, NoticeKind, Screen},
    gateway::{GatewayConfig, HttpGateway, MSG_UNREACHABLE},
    validation::{Field, MSG_NAME_REQUIRED, MSG_PASSWORD_MISMATCH},
};
use serde_json::json;
use std::{cell::RefCell, net::TcpListener, rc::Rc};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

type Notices = Rc<RefCell<Vec<Notice>>>;

fn controller(
    uri: &str,
) -> Result<(
    AuthFlowController<HttpGateway, impl Fn(&Notice)>,
    Notices,
)> {
    let gateway = HttpGateway::new(GatewayConfig::parse(uri, None)?)?;
    let notices: Notices = Rc::default();
    let sink = Rc::clone(&notices);
    let notifier = move |notice: &Notice| sink.borrow_mut().push(notice.clone());

    let mut controller = AuthFlowController::new(FlowConfig::default(), gateway, notifier);
    for _ in 0..3 {
        controller.advance();
    }
    Ok((controller, notices))
}

fn fill_register(
    controller: &mut AuthFlowController<HttpGateway, impl Fn(&Notice)>,
    values: [&str; 4],
) {
    controller.toggle_mode();
    controller.edit(Field::Name, values[0]);
    controller.edit(Field::Email, values[1]);
    controller.edit(Field::Password, values[2]);
    controller.edit(Field::ConfirmPassword, values[3]);
}

async fn received(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |requests| requests.len())
}

#[tokio::test]
async fn scenario_a_missing_name_makes_no_call() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let (mut controller, notices) = controller(&server.uri())?;

    fill_register(&mut controller, ["", "a@b.com", "123456", "123456"]);
    controller.submit().await;

    assert_eq!(received(&server).await, 0);
    assert_eq!(*notices.borrow(), vec![Notice::error(MSG_NAME_REQUIRED)]);
    assert_eq!(
        controller.screen(),
        Screen::AuthForm {
            mode: AuthMode::Register
        }
    );
    Ok(())
}

#[tokio::test]
async fn scenario_b_password_mismatch() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let (mut controller, notices) = controller(&server.uri())?;

    fill_register(&mut controller, ["Ana", "ana@x.com", "abcdef", "abcdeg"]);
    controller.submit().await;

    assert_eq!(received(&server).await, 0);
    assert_eq!(*notices.borrow(), vec![Notice::error(MSG_PASSWORD_MISMATCH)]);
    Ok(())
}

#[tokio::test]
async fn scenario_c_sign_in_success() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Ana" })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut controller, notices) = controller(&server.uri())?;
    controller.edit(Field::Email, "u@x.com");
    controller.edit(Field::Password, "secret1");
    controller.submit().await;

    assert_eq!(
        controller.screen(),
        Screen::Protected {
            display_name: "Ana".to_string()
        }
    );
    assert!(notices.borrow().is_empty());

    controller.sign_out();
    assert_eq!(
        controller.screen(),
        Screen::AuthForm {
            mode: AuthMode::SignIn
        }
    );
    Ok(())
}

#[tokio::test]
async fn scenario_d_sign_in_rejected() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "bad password" })))
        .mount(&server)
        .await;

    let (mut controller, notices) = controller(&server.uri())?;
    controller.edit(Field::Email, "u@x.com");
    controller.edit(Field::Password, "wrong1");
    controller.submit().await;

    assert_eq!(controller.state().mode(), Some(AuthMode::SignIn));
    assert!(!controller.state().is_authenticated());
    assert_eq!(*notices.borrow(), vec![Notice::error("bad password")]);
    Ok(())
}

#[tokio::test]
async fn scenario_e_server_unreachable() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let uri = format!("http://{}", listener.local_addr()?);
    drop(listener);

    let (mut controller, notices) = controller(&uri)?;
    controller.edit(Field::Email, "u@x.com");
    controller.edit(Field::Password, "secret1");
    controller.submit().await;

    assert_eq!(controller.state().mode(), Some(AuthMode::SignIn));
    assert!(!controller.state().is_busy());
    assert_eq!(*notices.borrow(), vec![Notice::error(MSG_UNREACHABLE)]);
    Ok(())
}

#[tokio::test]
async fn register_then_sign_in_with_other_account() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Lucía" })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut controller, notices) = controller(&server.uri())?;
    fill_register(&mut controller, ["Ana", "ana@x.com", "abcdef", "abcdef"]);
    controller.submit().await;

    assert_eq!(controller.state().mode(), Some(AuthMode::SignIn));
    assert!(!controller.state().is_authenticated());
    assert_eq!(
        notices.borrow().last().map(|notice| notice.kind),
        Some(NoticeKind::Success)
    );

    controller.edit(Field::Email, "lucia@x.com");
    controller.edit(Field::Password, "another1");
    controller.submit().await;

    assert_eq!(
        controller.state().session().map(|s| s.display_name.as_str()),
        Some("Lucía")
    );
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_stays_in_register_mode() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "email already in use" })),
        )
        .mount(&server)
        .await;

    let (mut controller, notices) = controller(&server.uri())?;
    fill_register(&mut controller, ["Ana", "ana@x.com", "abcdef", "abcdef"]);
    controller.submit().await;

    assert_eq!(controller.state().mode(), Some(AuthMode::Register));
    assert_eq!(*notices.borrow(), vec![Notice::error("email already in use")]);
    Ok(())
}

#[tokio::test]
async fn skipped_onboarding_shows_sign_in_form() -> Result<()> {
    let gateway = HttpGateway::new(GatewayConfig::parse("http://127.0.0.1:9", None)?)?;
    let config = FlowConfig {
        onboarding_enabled: false,
        ..FlowConfig::default()
    };
    let controller = AuthFlowController::new(config, gateway, LogNotifier);

    assert_eq!(
        controller.screen(),
        Screen::AuthForm {
            mode: AuthMode::SignIn
        }
    );
    Ok(())
}
