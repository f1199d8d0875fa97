//! Page Templates
//!
//! MiniJinja 页面模板：配置页、报告页、错误页。
//! `.html` 模板默认自动转义，报告 HTML 片段以 `safe` 方式嵌入。

use axum::http::StatusCode;
use minijinja::{context, Environment};

/// 页面模板集合
pub struct PageTemplates {
    env: Environment<'static>,
}

impl PageTemplates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("../../../templates/base.html"))?;
        env.add_template("config.html", include_str!("../../../templates/config.html"))?;
        env.add_template("report.html", include_str!("../../../templates/report.html"))?;
        env.add_template("error.html", include_str!("../../../templates/error.html"))?;
        Ok(Self { env })
    }

    /// 首页 / 配置页
    pub fn config_page(
        &self,
        stock_list: &str,
        env_filename: &str,
        message: Option<&str>,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("config.html")?.render(context! {
            title => "股票分析 Web UI",
            stock_list => stock_list,
            env_filename => env_filename,
            message => message,
        })
    }

    /// 报告页，`content` 为已渲染的 HTML 片段
    pub fn report_page(&self, title: &str, content: &str) -> Result<String, minijinja::Error> {
        self.env.get_template("report.html")?.render(context! {
            title => title,
            content => content,
        })
    }

    /// 错误页，模板渲染失败时退回最简 HTML
    pub fn error_page(&self, status: StatusCode, message: &str) -> String {
        let rendered = self.env.get_template("error.html").and_then(|t| {
            t.render(context! {
                title => format!("Error {}", status.as_u16()),
                status => status.as_u16(),
                message => message,
            })
        });

        rendered.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to render error page");
            format!(
                "<html><body><h1>Error {}</h1></body></html>",
                status.as_u16()
            )
        })
    }
}
