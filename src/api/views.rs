//! 页面渲染
//!
//! 模板在编译期嵌入，`.html` 模板默认开启 HTML 转义。

use minijinja::{Environment, context};
use serde::Serialize;

use crate::error::Result;
use crate::models::QuestionAndAnswer;

const TEMPLATES: [(&str, &str); 3] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("about.html", include_str!("../../templates/about.html")),
];

/// 首页中的一行历史记录
#[derive(Debug, Serialize)]
pub struct HistoryRow {
    pub question: String,
    pub answer: String,
    pub created_at: String,
}

impl From<&QuestionAndAnswer> for HistoryRow {
    fn from(record: &QuestionAndAnswer) -> Self {
        Self {
            question: record.question().to_string(),
            answer: record.answer().to_string(),
            created_at: record
                .created_at()
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
        }
    }
}

/// 首页数据
#[derive(Debug, Default, Serialize)]
pub struct IndexPage<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// 回填到输入框的问题
    pub question: &'a str,
    pub field_error: Option<String>,
    pub general_error: Option<String>,
    pub history: Vec<HistoryRow>,
}

/// 页面模板集合
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render_index(&self, page: &IndexPage<'_>) -> Result<String> {
        let template = self.env.get_template("index.html")?;
        Ok(template.render(page)?)
    }

    pub fn render_about(&self, title: &str, description: &str) -> Result<String> {
        let template = self.env.get_template("about.html")?;
        Ok(template.render(context! {
            title => title,
            description => description,
            message => "The Magic 8-Ball Random Answer Generator",
        })?)
    }
}
