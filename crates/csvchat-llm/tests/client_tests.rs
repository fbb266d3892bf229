// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use csvchat_app::TableSummary;
use csvchat_llm::{APOLOGY, AnswerService, Client, Message};
use std::io::Read;
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Response, Server};

fn json_header() -> Header {
    Header::from_bytes("Content-Type", "application/json").expect("valid content type header")
}

fn summary() -> TableSummary {
    TableSummary {
        headers: vec!["Numero".to_owned(), "Ementa".to_owned(), "Data".to_owned()],
        row_count: 3,
    }
}

#[test]
fn unreachable_endpoint_names_the_base_url() -> Result<()> {
    let client = Client::new(
        "http://127.0.0.1:1/v1",
        "gemini-2.0-flash",
        None,
        Duration::from_millis(50),
    )?;

    let error = client
        .ping()
        .expect_err("ping should fail for unreachable endpoint");
    assert!(error.to_string().contains("127.0.0.1:1"));
    Ok(())
}

#[test]
fn list_models_and_ping_work_against_mock_server() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/v1", server.server_addr());

    let handle = thread::spawn(move || {
        for _ in 0..2 {
            let request = server.recv().expect("request expected");
            assert_eq!(request.url(), "/v1/models");
            let response =
                Response::from_string(r#"{"data":[{"id":"models/gemini-2.0-flash"}]}"#)
                    .with_status_code(200)
                    .with_header(json_header());
            request.respond(response).expect("response should succeed");
        }
    });

    let client = Client::new(&addr, "gemini-2.0-flash", None, Duration::from_secs(1))?;
    let models = client.list_models()?;
    assert_eq!(models, vec!["models/gemini-2.0-flash".to_owned()]);
    client.ping()?;

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn chat_complete_sends_bearer_key_and_prompt() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/v1", server.server_addr());

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/v1/chat/completions");
        let auth = request
            .headers()
            .iter()
            .find(|header| header.field.equiv("Authorization"))
            .map(|header| header.value.as_str().to_owned());
        assert_eq!(auth.as_deref(), Some("Bearer test-key"));

        let mut body = String::new();
        request
            .as_reader()
            .read_to_string(&mut body)
            .expect("request body should read");
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("body is JSON");
        assert_eq!(parsed["model"], "gemini-2.0-flash");
        assert_eq!(parsed["messages"][0]["role"], "user");
        assert_eq!(parsed["messages"][0]["content"], "Say hi");

        let response = Response::from_string(
            r#"{"choices":[{"message":{"role":"assistant","content":"Hello"}}]}"#,
        )
        .with_status_code(200)
        .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(
        &addr,
        "gemini-2.0-flash",
        Some("test-key"),
        Duration::from_secs(1),
    )?;
    let reply = client.chat_complete(&[Message::user("Say hi")])?;
    assert_eq!(reply, "Hello");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn chat_complete_condenses_error_envelope() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/v1", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        let response = Response::from_string(r#"{"error":{"message":"quota exceeded"}}"#)
            .with_status_code(429)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, "gemini-2.0-flash", None, Duration::from_secs(1))?;
    let error = client
        .chat_complete(&[Message::user("q")])
        .expect_err("429 should fail");
    assert_eq!(error.to_string(), "server error (429): quota exceeded");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn answer_service_returns_model_text() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/v1", server.server_addr());

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        let mut body = String::new();
        request
            .as_reader()
            .read_to_string(&mut body)
            .expect("request body should read");
        assert!(body.contains("Quantas portarias?"));
        assert!(body.contains("Rows: 3"));
        let response = Response::from_string(
            r#"{"choices":[{"message":{"content":"Answer: three portarias"}}]}"#,
        )
        .with_status_code(200)
        .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, "gemini-2.0-flash", None, Duration::from_secs(1))?;
    let service = AnswerService::new(client, None);
    assert_eq!(
        service.answer("Quantas portarias?", &summary()),
        "Answer: three portarias"
    );

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn answer_service_apologizes_when_endpoint_fails() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/v1", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(Response::from_string("boom").with_status_code(500))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, "gemini-2.0-flash", None, Duration::from_secs(1))?;
    let service = AnswerService::new(client, Some("extra".to_owned()));
    assert_eq!(service.answer("q", &summary()), APOLOGY);

    handle.join().expect("server thread should join");
    Ok(())
}
