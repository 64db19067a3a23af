//! 问答历史服务
//!
//! 维护按时间倒序排列的问答记录，只保存在内存中。

use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::error::{AppError, Result};
use crate::models::QuestionAndAnswer;

/// 问答历史服务 trait
#[cfg_attr(test, mockall::automock)]
pub trait QuestionAnswerService: Send + Sync {
    /// 返回全部记录的快照，最新的在前
    fn get_all(&self) -> Vec<QuestionAndAnswer>;

    /// 在最前面插入一条记录
    fn add(&self, record: QuestionAndAnswer);

    /// 清空全部记录
    fn clear(&self);

    /// 记录数量
    fn len(&self) -> usize {
        self.get_all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 插入可能缺失的记录，缺失时返回 [`AppError::InvalidArgument`] 且不修改状态
    fn try_add(&self, record: Option<QuestionAndAnswer>) -> Result<()> {
        let record = record.ok_or_else(|| AppError::missing("record"))?;
        self.add(record);
        Ok(())
    }
}

/// 内存实现
///
/// 所有操作都在同一把锁内完成，`get_all` 返回复制出的快照。
#[derive(Debug, Default)]
pub struct InMemoryQuestionAnswerService {
    records: Mutex<VecDeque<QuestionAndAnswer>>,
}

impl InMemoryQuestionAnswerService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuestionAnswerService for InMemoryQuestionAnswerService {
    fn get_all(&self) -> Vec<QuestionAndAnswer> {
        self.records.lock().iter().cloned().collect()
    }

    fn add(&self, record: QuestionAndAnswer) {
        self.records.lock().push_front(record);
    }

    fn clear(&self) {
        self.records.lock().clear();
    }

    fn len(&self) -> usize {
        self.records.lock().len()
    }
}

/// 创建问答历史服务
pub fn create_question_answer_service() -> Box<dyn QuestionAnswerService> {
    Box::new(InMemoryQuestionAnswerService::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn record(question: &str, answer: &str) -> QuestionAndAnswer {
        QuestionAndAnswer::new(question, answer)
    }

    #[test]
    fn test_new_store_is_empty() {
        let service = InMemoryQuestionAnswerService::new();
        assert!(service.get_all().is_empty());
        assert!(service.is_empty());
    }

    #[test]
    fn test_add_inserts_at_front() {
        let service = InMemoryQuestionAnswerService::new();
        let t1 = Utc::now();
        let t2 = t1 + Duration::seconds(1);
        let first = QuestionAndAnswer::with_created_at("Q1", "A1", t1);
        let second = QuestionAndAnswer::with_created_at("Q2", "A2", t2);

        service.add(first.clone());
        assert_eq!(service.len(), 1);
        service.add(second.clone());

        assert_eq!(service.get_all(), vec![second, first]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let service = InMemoryQuestionAnswerService::new();
        service.add(record("Q1", "A1"));

        let mut snapshot = service.get_all();
        snapshot.clear();
        snapshot.push(record("injected", "nope"));

        let current = service.get_all();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].question(), "Q1");
    }

    #[test]
    fn test_clear_removes_everything() {
        let service = InMemoryQuestionAnswerService::new();
        for i in 0..5 {
            service.add(record(&format!("Q{}", i), "A"));
        }
        assert_eq!(service.len(), 5);

        service.clear();
        assert!(service.get_all().is_empty());

        service.clear();
        assert!(service.is_empty());
    }

    #[test]
    fn test_try_add_rejects_missing_record() {
        let service = InMemoryQuestionAnswerService::new();
        let err = service.try_add(None).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
        assert!(service.is_empty());

        service.try_add(Some(record("Q", "A"))).unwrap();
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let service = Arc::new(InMemoryQuestionAnswerService::new());

        let handles: Vec<_> = (0..100)
            .map(|i| {
                let service = service.clone();
                std::thread::spawn(move || {
                    service.add(record(&format!("Question {}", i), "Yes"));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let all = service.get_all();
        assert_eq!(all.len(), 100);
        let unique: HashSet<_> = all.iter().map(|r| r.question().to_string()).collect();
        assert_eq!(unique.len(), 100);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reads_see_whole_batches() {
        let service = Arc::new(InMemoryQuestionAnswerService::new());

        let writer = {
            let service = service.clone();
            tokio::spawn(async move {
                for i in 0..500 {
                    service.add(record(&format!("Q{}", i), "A"));
                    tokio::task::yield_now().await;
                }
            })
        };

        let reader = {
            let service = service.clone();
            tokio::spawn(async move {
                let mut last = 0;
                for _ in 0..500 {
                    let snapshot = service.get_all();
                    assert!(snapshot.len() >= last);
                    // 每个快照都必须是完整的前缀：最新一条的序号 = 长度 - 1
                    if let Some(newest) = snapshot.first() {
                        assert_eq!(newest.question(), format!("Q{}", snapshot.len() - 1));
                    }
                    last = snapshot.len();
                    tokio::task::yield_now().await;
                }
            })
        };

        writer.await.unwrap();
        reader.await.unwrap();
        assert_eq!(service.len(), 500);
    }
}
