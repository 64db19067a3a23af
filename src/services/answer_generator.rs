//! 答案生成服务
//!
//! 将问题确定性地映射到 20 条固定答案之一。
//!
//! 算法（版本 1）：
//! 1. 对问题的 UTF-8 字节计算 FNV-1a 64 位哈希作为种子；
//! 2. 种子经过一步 SplitMix64 混淆；
//! 3. 通过 128 位乘法取高 64 位，把结果归约到 `[0, 20)`。
//!
//! 结果只取决于问题的字节序列，不依赖进程随机种子，跨进程、跨平台稳定。

use async_trait::async_trait;
use tracing::debug;

use crate::error::{AppError, Result};

/// 选择算法版本，修改算法时必须递增
pub const ALGORITHM_VERSION: u32 = 1;

/// 固定的答案列表，顺序即索引
pub const ANSWERS: [&str; 20] = [
    "It is certain",
    "It is decidedly so",
    "Without a doubt",
    "Yes, definitely",
    "You may rely on it",
    "As I see it, yes",
    "Most likely",
    "Outlook good",
    "Yes",
    "Signs point to yes",
    "Reply hazy try again",
    "Ask again later",
    "Better not tell you now",
    "Cannot predict now",
    "Concentrate and ask again",
    "Don't count on it",
    "My reply is no",
    "My sources say no",
    "Outlook not so good",
    "Very doubtful",
];

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64 位哈希
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// SplitMix64 单步输出
pub fn splitmix64(mut value: u64) -> u64 {
    value = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    value = (value ^ (value >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value = (value ^ (value >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

/// 计算问题对应的答案索引，范围 `[0, ANSWERS.len())`
pub fn answer_index(question: &str) -> usize {
    let value = splitmix64(fnv1a64(question.as_bytes()));
    ((value as u128 * ANSWERS.len() as u128) >> 64) as usize
}

/// 为问题选择答案
pub fn select_answer(question: &str) -> &'static str {
    ANSWERS[answer_index(question)]
}

/// 判断字符串是否属于固定答案集合
pub fn is_known_answer(answer: &str) -> bool {
    ANSWERS.contains(&answer)
}

/// 答案生成器 trait
///
/// `None` 表示调用方没有提供问题，返回 [`AppError::InvalidArgument`]；
/// 空字符串和纯空白字符串都是合法输入。
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// 同步生成答案
    fn generate_answer(&self, question: Option<&str>) -> Result<&'static str>;

    /// 异步生成答案，结果与同步版本一致
    async fn generate_answer_async(&self, question: Option<&str>) -> Result<&'static str> {
        self.generate_answer(question)
    }
}

/// 基于稳定哈希的确定性答案生成器
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicAnswerGenerator;

impl DeterministicAnswerGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnswerGenerator for DeterministicAnswerGenerator {
    fn generate_answer(&self, question: Option<&str>) -> Result<&'static str> {
        let question = question.ok_or_else(|| AppError::missing("question"))?;
        let answer = select_answer(question);
        debug!(question_len = question.len(), answer, "Answer selected");
        Ok(answer)
    }
}

/// 创建答案生成器
pub fn create_answer_generator() -> Box<dyn AnswerGenerator> {
    Box::new(DeterministicAnswerGenerator::new())
}
