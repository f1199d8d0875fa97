//! Report Renderer - Markdown 报告转 HTML
//!
//! 支持表格、围栏代码块、单换行转 `<br>`。
//! Markdown 能力不可用时（`markdown` feature 关闭或配置禁用），
//! 原文放入 `<pre>` 原样输出。渲染结果不做 HTML 净化，
//! 报告内容必须来自受信任的分析流水线。

/// 渲染方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// 已转换为 HTML
    Rendered,
    /// 降级为 `<pre>` 原文
    Fallback,
}

/// 渲染结果
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub html: String,
    pub mode: RenderMode,
}

/// Markdown 报告渲染器
#[derive(Debug, Clone, Copy)]
pub struct ReportRenderer {
    markdown: bool,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer {
    /// 使用编译期可用的 Markdown 能力
    pub fn new() -> Self {
        Self {
            markdown: Self::markdown_available(),
        }
    }

    /// 始终降级输出（配置禁用 Markdown 时使用）
    pub fn plain() -> Self {
        Self { markdown: false }
    }

    /// 按配置开关创建，编译期不可用时开关无效
    pub fn with_markdown(enabled: bool) -> Self {
        Self {
            markdown: enabled && Self::markdown_available(),
        }
    }

    /// 当前构建是否包含 Markdown 转换能力
    pub fn markdown_available() -> bool {
        cfg!(feature = "markdown")
    }

    pub fn mode(&self) -> RenderMode {
        if self.markdown {
            RenderMode::Rendered
        } else {
            RenderMode::Fallback
        }
    }

    /// 渲染 Markdown，永不失败且不返回空内容
    pub fn render(&self, source: &str) -> RenderedReport {
        if self.markdown {
            if let Some(html) = markdown_to_html(source) {
                if !html.trim().is_empty() {
                    return RenderedReport {
                        html,
                        mode: RenderMode::Rendered,
                    };
                }
            }
        }

        RenderedReport {
            html: fallback(source),
            mode: RenderMode::Fallback,
        }
    }
}

fn fallback(source: &str) -> String {
    format!("<pre>{}</pre>", source)
}

#[cfg(feature = "markdown")]
fn markdown_to_html(source: &str) -> Option<String> {
    use pulldown_cmark::{html, Event, Options, Parser};

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    // nl2br: 段落内的单换行也输出为 <br />
    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut output, parser);
    Some(output)
}

#[cfg(not(feature = "markdown"))]
fn markdown_to_html(_source: &str) -> Option<String> {
    None
}
