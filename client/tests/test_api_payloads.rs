//! Tests for backend payload shapes

use exam_client_core_rs::api::{
    parse_assignments, parse_consume_token, parse_events, parse_exam, parse_questions,
    parse_responses, to_json, ApiError, AssignmentScoreRequest, ConsumeTokenRequest, Endpoints,
    LogEventRequest, SubmitAnswerRequest,
};
use exam_client_core_rs::{
    find_launch_token, score, CompletionReason, ExamEvent, ExamTimer, LaunchParams, QuestionType,
};
use serde_json::json;

#[test]
fn test_parse_exam_wrapped_and_bare() {
    let wrapped = parse_exam(
        r#"{"exam": {"exam_id": "e1", "title": "Intro", "duration_minutes": 20, "max_attempts": 1}}"#,
    )
    .unwrap();
    let bare = parse_exam(r#"{"exam_id": "e1", "title": "Intro", "duration_minutes": 20}"#).unwrap();

    assert_eq!(wrapped.exam_id, "e1");
    assert_eq!(wrapped.max_attempts, Some(1));
    assert_eq!(bare.duration_seconds(), Some(1200));
}

#[test]
fn test_parse_exam_lenient_durations() {
    let null = parse_exam(r#"{"exam_id": "e1", "title": "Intro", "duration_minutes": null}"#).unwrap();
    assert!(!null.is_timed());
    assert!(ExamTimer::for_exam(&null).is_none());

    let fractional =
        parse_exam(r#"{"exam": {"exam_id": "e1", "title": "Intro", "duration_minutes": 1.5}}"#)
            .unwrap();
    assert_eq!(fractional.duration_seconds(), Some(90));

    let huge = parse_exam(r#"{"exam_id": "e1", "title": "Intro", "duration_minutes": 1e300}"#).unwrap();
    assert_eq!(huge.duration_seconds(), Some(u64::MAX));
}

#[test]
fn test_parse_exam_reports_field_error() {
    let err = parse_exam(r#"{"exam_id": "e1", "title": "Intro", "duration_minutes": "soon"}"#)
        .unwrap_err();
    assert!(
        err.to_string().contains("invalid type: string \"soon\""),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_parse_exam_rejects_garbage() {
    let err = parse_exam(r#"{"title": 3}"#).unwrap_err();
    assert!(matches!(err, ApiError::Malformed { payload: "exam", .. }));
}

#[test]
fn test_parse_questions() {
    let questions = parse_questions(
        r#"{"questions": [
            {"question_id": "q1", "exam_id": "e1", "type": "multiple-choice",
             "prompt": "Pick one", "choices": ["a", "b"], "points": 2},
            {"question_id": "q2", "exam_id": "e1", "type": "short-answer",
             "prompt": "Explain", "image_url": "https://cdn.example.com/q2.png"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].question_type, QuestionType::MultipleChoice);
    assert_eq!(questions[0].points, Some(2));
    assert_eq!(questions[1].question_type, QuestionType::ShortAnswer);
    assert!(questions[1].image_url.is_some());

    // Missing list means no questions
    assert!(parse_questions("{}").unwrap().is_empty());
}

#[test]
fn test_parse_responses_and_score() {
    let responses = parse_responses(
        r#"{"responses": [
            {"question_id": "q1", "answer": "a", "is_correct": true},
            {"question_id": "q2", "answer": "b", "is_correct": true},
            {"question_id": "q3", "answer": "", "is_correct": false}
        ]}"#,
    )
    .unwrap();
    assert_eq!(score(&responses), 2);
}

#[test]
fn test_completion_check() {
    assert!(parse_events(r#"{"events": [{"event_type": "exam_completed"}]}"#)
        .unwrap()
        .is_completed());
    assert!(!parse_events(r#"{"events": []}"#).unwrap().is_completed());
}

#[test]
fn test_submit_request_body() {
    let request = SubmitAnswerRequest {
        user_id: "u1".to_string(),
        question_id: "q1".to_string(),
        answer: "Paris".to_string(),
    };
    let body: serde_json::Value = serde_json::from_str(&to_json("submit", &request).unwrap()).unwrap();
    assert_eq!(
        body,
        json!({ "user_id": "u1", "question_id": "q1", "answer": "Paris" })
    );
}

#[test]
fn test_log_event_request_bodies() {
    let start = LogEventRequest::from_event("u1", "e1", &ExamEvent::Start);
    assert_eq!(
        serde_json::to_value(&start).unwrap(),
        json!({ "user_id": "u1", "exam_id": "e1", "event_type": "start" })
    );

    let completed = LogEventRequest::from_event(
        "u1",
        "e1",
        &ExamEvent::ExamCompleted {
            score: 4,
            duration_seconds: Some(600),
            reason: Some(CompletionReason::TimerExpired),
        },
    );
    assert_eq!(
        serde_json::to_value(&completed).unwrap(),
        json!({
            "user_id": "u1",
            "exam_id": "e1",
            "event_type": "exam_completed",
            "event_data": { "score": 4, "duration_seconds": 600, "reason": "timer_expired" }
        })
    );
}

#[test]
fn test_endpoints_drop_trailing_slash() {
    let api = Endpoints::new("https://api.example.com///");
    assert_eq!(api.base_url(), "https://api.example.com");
    assert_eq!(api.events(), "https://api.example.com/events");
    assert_eq!(api.questions("e1"), "https://api.example.com/questions?exam_id=e1");
}

#[test]
fn test_assignment_score_write_back() {
    let api = Endpoints::new("https://api.example.com");
    assert_eq!(
        api.assignments("user123", "exam456"),
        "https://api.example.com/assignments?user_id=user123&exam_id=exam456"
    );

    let envelope =
        parse_assignments(r#"{"assignments": [{"assignment_id": "as-9"}, {"assignment_id": "as-10"}]}"#)
            .unwrap();
    let assignment_id = envelope.first_assignment_id().unwrap();
    assert_eq!(api.assignment(&assignment_id), "https://api.example.com/assignments/as-9");

    let completed = ExamEvent::ExamCompleted {
        score: 3,
        duration_seconds: Some(120),
        reason: None,
    };
    let request = AssignmentScoreRequest::from_event(&completed).unwrap();
    assert_eq!(serde_json::to_value(request).unwrap(), json!({ "score": 3 }));
}

#[test]
fn test_token_launch_flow() {
    let token = find_launch_token(
        Some(r#"{"user": null}"#),
        Some("?foo=bar"),
        Some("passport://start?token=tok%3D1"),
    )
    .unwrap();
    assert_eq!(token, "tok=1");

    let request = ConsumeTokenRequest { token };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "token": "tok=1" })
    );

    let reply = parse_consume_token(
        r#"{"user_id": "user123", "exam_id": "exam456", "duration_minutes": 20, "questions": []}"#,
    )
    .unwrap();
    assert_eq!(
        reply.launch_params().unwrap(),
        LaunchParams {
            user_id: "user123".to_string(),
            exam_id: "exam456".to_string(),
        }
    );
    assert_eq!(reply.questions, Some(Vec::new()));
}

#[test]
fn test_query_launch_decodes_and_keeps_first_value() {
    let launch = LaunchParams::from_query("userId=kent%40example.com&userId=other&examId=e%201").unwrap();
    assert_eq!(launch.user_id, "kent@example.com");
    assert_eq!(launch.exam_id, "e 1");
}
