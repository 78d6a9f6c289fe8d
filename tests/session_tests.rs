use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lavka_client::config::ClientOptions;
use lavka_client::error::Error;
use lavka_client::session::{Credentials, Role};
use lavka_client::Lavka;

async fn mount_login(server: &MockServer, role: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "test-token",
            "user": { "_id": "u1", "username": "vasya", "role": role }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn sign_in_stores_identity_and_token() {
    let server = MockServer::start().await;
    mount_login(&server, "user").await;

    let lavka = Lavka::new(&server.uri());
    let user = lavka
        .session()
        .sign_in(&Credentials::new("vasya", "Secret1"))
        .await
        .unwrap();

    assert_eq!(user.username, "vasya");
    assert_eq!(user.role, Role::User);
    assert!(lavka.session().is_authenticated());
    assert!(!lavka.session().is_admin());
    assert_eq!(lavka.session().token().as_deref(), Some("test-token"));
}

#[tokio::test]
async fn sign_in_failure_mutates_nothing_and_surfaces_the_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "message": "Неверный email или пароль" })),
        )
        .mount(&server)
        .await;

    let lavka = Lavka::new(&server.uri());
    let result = lavka
        .session()
        .sign_in(&Credentials::new("vasya", "wrong"))
        .await;

    match result {
        Err(Error::Rejected { message, .. }) => {
            assert_eq!(message, "Неверный email или пароль");
        }
        other => panic!("expected a rejection, got {:?}", other.map(|u| u.username)),
    }
    assert!(!lavka.session().is_authenticated());
    assert!(lavka.session().current_user().is_none());
}

#[tokio::test]
async fn sign_up_registers_and_signs_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "fresh-token",
            "user": { "_id": "u2", "username": "petya", "role": "user" }
        })))
        .mount(&server)
        .await;

    let lavka = Lavka::new(&server.uri());
    let user = lavka
        .session()
        .sign_up(&Credentials::new("petya", "Secret1"))
        .await
        .unwrap();

    assert_eq!(user.id, "u2");
    assert_eq!(lavka.session().token().as_deref(), Some("fresh-token"));
}

#[tokio::test]
async fn sign_out_rejects_later_basket_calls_and_leaves_the_basket_alone() {
    let server = MockServer::start().await;
    mount_login(&server, "user").await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "productId": "p1", "name": "Керамическая чашка", "price": 950.0,
              "image": "/placeholder.svg", "quantity": 1 }
        ])))
        .mount(&server)
        .await;

    let lavka = Lavka::new(&server.uri());
    lavka
        .session()
        .sign_in(&Credentials::new("vasya", "Secret1"))
        .await
        .unwrap();
    lavka.basket().load().await.unwrap();
    assert_eq!(lavka.basket().entries().len(), 1);

    lavka.session().sign_out();
    assert!(!lavka.session().is_authenticated());

    let result = lavka.basket().add_one("p1").await;
    assert!(matches!(result, Err(Error::Auth(_))));
    assert_eq!(lavka.basket().entries().len(), 1);
}

#[tokio::test]
async fn restore_round_trips_through_the_session_file() {
    let server = MockServer::start().await;
    mount_login(&server, "admin").await;

    let dir = tempfile::tempdir().unwrap();
    let options = ClientOptions::default().with_session_file(dir.path().join("session.json"));

    {
        let lavka = Lavka::new_with_options(&server.uri(), options.clone());
        lavka
            .session()
            .sign_in(&Credentials::new("vasya", "Secret1"))
            .await
            .unwrap();
    }

    let lavka = Lavka::new_with_options(&server.uri(), options.clone());
    assert!(!lavka.session().is_authenticated());

    let restored = lavka.session().restore().unwrap();
    assert_eq!(restored.username, "vasya");
    assert!(lavka.session().is_admin());
    assert_eq!(lavka.session().token().as_deref(), Some("test-token"));

    // Sign-out must clear the file too
    lavka.session().sign_out();
    let again = Lavka::new_with_options(&server.uri(), options);
    assert!(again.session().restore().is_none());
}

#[tokio::test]
async fn bearer_token_is_attached_when_held_and_omitted_when_not() {
    let server = MockServer::start().await;
    mount_login(&server, "user").await;

    // Matches only requests carrying the signed-in token
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "p1", "name": "authed", "description": "", "price": 1.0,
              "image": "", "category": "", "countInStock": 1 }
        ])))
        .mount(&server)
        .await;
    // Catch-all for requests without the token
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let lavka = Lavka::new(&server.uri());

    let anonymous = lavka.catalog().list(None).await.unwrap();
    assert!(anonymous.is_empty());

    lavka
        .session()
        .sign_in(&Credentials::new("vasya", "Secret1"))
        .await
        .unwrap();
    let authed = lavka.catalog().list(None).await.unwrap();
    assert_eq!(authed.len(), 1);
    assert_eq!(authed[0].name, "authed");
}
