use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lavka_client::error::Error;
use lavka_client::session::Credentials;
use lavka_client::Lavka;

fn entry_json(product_id: &str, name: &str, price: f64, quantity: u32) -> serde_json::Value {
    json!({
        "productId": product_id,
        "name": name,
        "price": price,
        "image": "/placeholder.svg",
        "quantity": quantity
    })
}

async fn signed_in_client(server: &MockServer) -> Lavka {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "test-token",
            "user": { "_id": "u1", "username": "vasya", "role": "user" }
        })))
        .mount(server)
        .await;

    let lavka = Lavka::new(&server.uri());
    lavka
        .session()
        .sign_in(&Credentials::new("vasya", "Secret1"))
        .await
        .unwrap();
    lavka
}

#[tokio::test]
async fn adding_the_same_item_twice_yields_one_entry_with_quantity_two() {
    let server = MockServer::start().await;
    let lavka = signed_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/cart"))
        .and(body_json(json!({ "productId": "p1", "quantity": 1 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;
    // The backend merges repeated adds into one entry; the authoritative
    // reloads see quantity 1, then 2
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([entry_json("p1", "Керамическая чашка", 950.0, 1)])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([entry_json("p1", "Керамическая чашка", 950.0, 2)])),
        )
        .mount(&server)
        .await;

    lavka.basket().add_one("p1").await.unwrap();
    lavka.basket().add_one("p1").await.unwrap();

    let entries = lavka.basket().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].quantity, 2);
    assert_eq!(lavka.basket().item_count(), 2);
}

#[tokio::test]
async fn update_quantity_below_one_is_a_no_op() {
    let server = MockServer::start().await;
    let lavka = signed_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([entry_json("p1", "Керамическая чашка", 950.0, 3)])),
        )
        .mount(&server)
        .await;
    // The no-op path must never reach the backend
    Mock::given(method("PUT"))
        .and(path("/cart/p1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    lavka.basket().load().await.unwrap();
    lavka.basket().update_quantity("p1", 0).await.unwrap();

    let entries = lavka.basket().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].quantity, 3);
}

#[tokio::test]
async fn update_quantity_reloads_the_authoritative_basket() {
    let server = MockServer::start().await;
    let lavka = signed_in_client(&server).await;

    Mock::given(method("PUT"))
        .and(path("/cart/p1"))
        .and(body_json(json!({ "quantity": 5 })))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([entry_json("p1", "Керамическая чашка", 950.0, 5)])),
        )
        .mount(&server)
        .await;

    lavka.basket().update_quantity("p1", 5).await.unwrap();
    assert_eq!(lavka.basket().entries()[0].quantity, 5);
}

#[tokio::test]
async fn remove_and_clear_empty_the_basket() {
    let server = MockServer::start().await;
    let lavka = signed_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            entry_json("p1", "Керамическая чашка", 950.0, 1),
            entry_json("p2", "Кожаный кошелек", 2500.0, 1),
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    lavka.basket().load().await.unwrap();
    assert_eq!(lavka.basket().entries().len(), 2);

    Mock::given(method("DELETE"))
        .and(path("/cart/p1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([entry_json("p2", "Кожаный кошелек", 2500.0, 1)])),
        )
        .mount(&server)
        .await;
    lavka.basket().remove("p1").await.unwrap();
    assert_eq!(lavka.basket().entries().len(), 1);

    Mock::given(method("DELETE"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    lavka.basket().clear().await.unwrap();
    assert!(lavka.basket().entries().is_empty());
}

#[tokio::test]
async fn unauthenticated_operations_are_rejected_without_state_change() {
    let server = MockServer::start().await;
    let lavka = Lavka::new(&server.uri());

    assert!(matches!(lavka.basket().load().await, Err(Error::Auth(_))));
    assert!(matches!(
        lavka.basket().add_one("p1").await,
        Err(Error::Auth(_))
    ));
    assert!(matches!(
        lavka.basket().update_quantity("p1", 2).await,
        Err(Error::Auth(_))
    ));
    assert!(matches!(
        lavka.basket().remove("p1").await,
        Err(Error::Auth(_))
    ));
    assert!(matches!(lavka.basket().clear().await, Err(Error::Auth(_))));
    assert!(lavka.basket().entries().is_empty());
}

#[tokio::test]
async fn totals_are_derived_from_the_held_basket() {
    let server = MockServer::start().await;
    let lavka = signed_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            entry_json("p1", "Керамическая чашка", 950.0, 2),
            entry_json("p2", "Кожаный кошелек", 2500.0, 1),
        ])))
        .mount(&server)
        .await;

    lavka.basket().load().await.unwrap();
    assert_eq!(lavka.basket().item_count(), 3);
    assert_eq!(lavka.basket().total(), 4400.0);
}
