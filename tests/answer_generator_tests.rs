// Integration tests for the answer generator
//
// Tests cover:
// - Membership in the canned answer set
// - Determinism and pinned answers
// - Missing input handling
// - Sync/async parity

use eightball::error::AppError;
use eightball::services::{
    ANSWERS, AnswerGenerator, DeterministicAnswerGenerator, create_answer_generator,
    is_known_answer, select_answer,
};
use std::collections::HashSet;

#[test]
fn test_same_question_same_answer() {
    let first = select_answer("Will this work?");
    let second = select_answer("Will this work?");
    assert_eq!(first, second);
    assert_eq!(first, "As I see it, yes");
}

#[test]
fn test_empty_question_is_answered() {
    let generator = create_answer_generator();
    let answer = generator.generate_answer(Some("")).unwrap();
    assert!(!answer.is_empty());
    assert!(ANSWERS.contains(&answer));
}

#[test]
fn test_missing_question_is_rejected() {
    let generator = DeterministicAnswerGenerator::new();
    match generator.generate_answer(None) {
        Err(AppError::InvalidArgument(message)) => assert!(message.contains("question")),
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_questions_differing_by_case_or_whitespace_are_independent() {
    let questions = [
        "will this work?",
        "Will this work?",
        "WILL THIS WORK?",
        " Will this work?",
        "Will this work? ",
    ];
    for q in questions {
        assert!(is_known_answer(select_answer(q)));
        assert_eq!(select_answer(q), select_answer(q));
    }
}

#[test]
fn test_many_questions_cover_several_answers() {
    let answers: HashSet<&str> = (0..1000)
        .map(|i| select_answer(&format!("Is number {} lucky?", i)))
        .collect();
    assert!(answers.len() > 10);
    assert!(answers.iter().all(|a| is_known_answer(a)));
}

#[test]
fn test_concurrent_callers_agree() {
    let expected = select_answer("Shared question");
    let handles: Vec<_> = (0..16)
        .map(|_| std::thread::spawn(|| select_answer("Shared question")))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[tokio::test]
async fn test_async_variant_matches() {
    let generator = DeterministicAnswerGenerator::new();
    for i in 0..50 {
        let q = format!("Async question {}", i);
        assert_eq!(
            generator.generate_answer_async(Some(&q)).await.unwrap(),
            generator.generate_answer(Some(&q)).unwrap()
        );
    }
}
