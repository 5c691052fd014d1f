use clap::Parser;
use httpmock::{Mock, MockServer};
use order_board::cli::{Commands, run_command_with_writers, run_session};
use order_board::env::Env;
use order_board::feed::HttpFeed;
use order_board::{BoardStore, FetchState};
use serde_json::json;
use tokio::io::AsyncWriteExt;
use url::Url;

fn create_test_env_with_mock_server(server: &MockServer, extra: &[&str]) -> Env {
    let source = server.url("/mockOrders.json");
    let mut args = vec!["order-board", "--source", &source, "--log-level", "debug"];
    args.extend_from_slice(extra);

    Env::try_parse_from(args).expect("Failed to parse test environment")
}

fn setup_orders_mock(server: &MockServer) -> Mock {
    server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/mockOrders.json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([
                {
                    "id": 1001,
                    "customer": "Ada Lovelace",
                    "items": ["Notebook", "Fountain Pen"],
                    "totalPrice": 42.5,
                    "status": "Pending",
                    "timestamp": "2024-03-01T10:15:00Z"
                },
                {
                    "id": 1002,
                    "customer": "Alan Turing",
                    "items": ["Teapot"],
                    "totalPrice": 18,
                    "status": "Completed",
                    "timestamp": "2024-02-27T16:40:00Z"
                },
                {
                    "id": 1003,
                    "customer": "Grace Hopper",
                    "items": ["Compiler Manual"],
                    "totalPrice": 64.99,
                    "status": "Pending",
                    "timestamp": "2024-02-29T09:05:00Z"
                }
            ]));
    })
}

fn view_ids(store: &mut BoardStore) -> Vec<String> {
    store.view().iter().map(|order| order.id.to_string()).collect()
}

#[tokio::test]
async fn test_show_renders_fetched_orders() {
    let server = MockServer::start();
    let mock = setup_orders_mock(&server);
    let env =
        create_test_env_with_mock_server(&server, &["--filter", "Pending", "--sort", "by_price"]);
    let mut out = Vec::new();

    run_command_with_writers(env, Commands::Show, &b""[..], &mut out)
        .await
        .unwrap();

    mock.assert();
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Filter: All [Pending] Completed"));
    assert!(output.contains("Sort:   Sort by Date [Sort by Price]"));
    assert!(output.contains("Notebook, Fountain Pen"));
    assert!(!output.contains("Alan Turing"));

    let ada = output.find("Ada Lovelace").unwrap();
    let grace = output.find("Grace Hopper").unwrap();
    assert!(ada < grace, "cheaper order must come first:\n{output}");
}

#[tokio::test]
async fn test_show_surfaces_server_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/mockOrders.json");
        then.status(500).body("boom");
    });
    let env = create_test_env_with_mock_server(&server, &[]);
    let mut out = Vec::new();

    run_command_with_writers(env, Commands::Show, &b""[..], &mut out)
        .await
        .unwrap();

    mock.assert();
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Failed to load orders: Fetching"), "{output}");
    assert!(output.contains("500"), "{output}");
    assert!(output.contains("body: boom"), "{output}");
}

#[tokio::test]
async fn test_interactive_session_completes_order() {
    let server = MockServer::start();
    let mock = setup_orders_mock(&server);
    let feed = HttpFeed::new(Url::parse(&server.url("/mockOrders.json")).unwrap());
    let mut store = BoardStore::default();
    let mut changes = store.subscribe();
    let (mut keyboard, input) = tokio::io::duplex(1024);

    // Type only once the fetched orders have been published.
    let typist = tokio::spawn(async move {
        changes.changed().await.unwrap();
        keyboard
            .write_all(b"complete 1003\nfilter Completed\nsort by_price\nquit\n")
            .await
            .unwrap();
        keyboard
    });

    let mut out = Vec::new();
    run_session(&feed, &mut store, tokio::io::BufReader::new(input), &mut out)
        .await
        .unwrap();
    drop(typist.await.unwrap());

    mock.assert();
    assert_eq!(store.fetch_state(), &FetchState::Loaded);
    assert_eq!(view_ids(&mut store), vec!["1002", "1003"]);

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Loading orders..."));
    // Loaded board shows two actions, one after completing 1003, none once filtered.
    assert_eq!(output.matches("[Complete Order]").count(), 3, "{output}");
}

#[tokio::test]
async fn test_interactive_session_ignores_hidden_order() {
    let server = MockServer::start();
    let mock = setup_orders_mock(&server);
    let feed = HttpFeed::new(Url::parse(&server.url("/mockOrders.json")).unwrap());
    let mut store = BoardStore::default();
    let mut changes = store.subscribe();
    let (mut keyboard, input) = tokio::io::duplex(1024);

    let typist = tokio::spawn(async move {
        changes.changed().await.unwrap();
        keyboard
            .write_all(b"filter Completed\ncomplete 1003\nfilter Pending\nquit\n")
            .await
            .unwrap();
        keyboard
    });

    let mut out = Vec::new();
    run_session(&feed, &mut store, tokio::io::BufReader::new(input), &mut out)
        .await
        .unwrap();
    drop(typist.await.unwrap());

    mock.assert();
    assert_eq!(view_ids(&mut store), vec!["1003", "1001"]);

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Order 1003 is not on the board"), "{output}");
}
