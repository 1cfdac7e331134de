//! `HttpQuestionService` against a local server that replays canned HTTP responses.

use quiz_core::model::{OptionLabel, SessionState};
use services::{
    Grading, HttpQuestionService, QuestionServiceConfig, QuestionServiceError, QuizController,
    QuizError, RetryPolicy, generate_with_retry,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const VALID_QUIZ: &str = r#"{"quiz_id":"quiz-http","questions":[
    {"question":"Which planet is largest?","options":["A. Mars","B. Jupiter","C. Venus"]},
    {"question":"Is water wet?","options":["Yes","No"]}
]}"#;

struct Canned {
    status: &'static str,
    body: &'static str,
}

fn canned(status: &'static str, body: &'static str) -> Canned {
    Canned { status, body }
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(end) = buf.windows(4).position(|window| window == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
    let body_len = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    buf.len() >= end + 4 + body_len
}

async fn answer(stream: &mut TcpStream, response: &Canned) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !request_complete(&buf) {
        let read = stream.read(&mut chunk).await.unwrap();
        if read == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..read]);
    }

    let reply = format!(
        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\
         connection: close\r\n\r\n{}",
        response.status,
        response.body.len(),
        response.body
    );
    stream.write_all(reply.as_bytes()).await.unwrap();
    let _ = stream.shutdown().await;

    let text = String::from_utf8_lossy(&buf).into_owned();
    text.lines().next().unwrap_or_default().to_string()
}

/// Serves one canned response per connection, in order. The handle yields the
/// request lines that were received.
async fn serve(responses: Vec<Canned>) -> (HttpQuestionService, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut request_lines = Vec::with_capacity(responses.len());
        for response in &responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            request_lines.push(answer(&mut stream, response).await);
        }
        request_lines
    });
    let config = QuestionServiceConfig::new(&format!("http://{addr}")).unwrap();
    (HttpQuestionService::new(config), handle)
}

#[tokio::test]
async fn generation_retries_server_errors_and_empty_bodies_until_ready() {
    let (service, server) = serve(vec![
        canned("500 Internal Server Error", r#"{"error":"model overloaded"}"#),
        canned("200 OK", r#"{"questions":[]}"#),
        canned("200 OK", VALID_QUIZ),
    ])
    .await;
    let mut controller = QuizController::new();
    controller.set_content("Jupiter is the largest planet in the solar system.");

    controller.generate(&service).await.unwrap();

    assert_eq!(controller.state(), SessionState::Ready);
    let session = controller.session().unwrap();
    assert_eq!(session.id().as_str(), "quiz-http");
    assert_eq!(session.len(), 2);
    assert_eq!(session.questions()[0].options().len(), 3);

    let request_lines = server.await.unwrap();
    assert_eq!(request_lines.len(), 3);
    assert!(
        request_lines
            .iter()
            .all(|line| line.starts_with("POST /generate-questions "))
    );
}

#[tokio::test]
async fn undecodable_bodies_exhaust_the_retry_policy() {
    let (service, server) = serve(vec![
        canned("200 OK", "<html>gateway</html>"),
        canned("200 OK", "<html>gateway</html>"),
    ])
    .await;
    let mut controller = QuizController::new().with_retry_policy(RetryPolicy::new(2));
    controller.set_content("Some pasted content.");
    let request = controller.begin_generate().unwrap();

    let err = generate_with_retry(&service, &request, controller.retry_policy())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        QuizError::GenerationFailed {
            attempts: 2,
            source: QuestionServiceError::Http(_)
        }
    ));
    assert_eq!(server.await.unwrap().len(), 2);
}

#[tokio::test]
async fn grading_server_error_is_a_terminal_failure() {
    let (service, server) = serve(vec![
        canned("200 OK", VALID_QUIZ),
        canned("503 Service Unavailable", r#"{"error":"try later"}"#),
    ])
    .await;
    let mut controller = QuizController::new();
    controller.set_content("Jupiter is the largest planet in the solar system.");
    controller.generate(&service).await.unwrap();
    controller.select(0, OptionLabel::parse("B").unwrap()).unwrap();

    let err = controller.submit(&service).await.unwrap_err();

    match err {
        QuizError::GradingFailed(QuestionServiceError::HttpStatus(status)) => {
            assert_eq!(status.as_u16(), 503);
        }
        other => panic!("expected an HTTP status grading failure, got {other:?}"),
    }
    assert_eq!(controller.state(), SessionState::Submitted);
    assert!(matches!(controller.grading(), Some(Grading::Failed)));
    assert!(!controller.inputs_enabled());

    let request_lines = server.await.unwrap();
    assert!(request_lines[1].starts_with("POST /check-answers "));
}
