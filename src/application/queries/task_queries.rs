//! Task Queries - 任务查询

use crate::application::ports::AnalysisTask;

/// 任务列表默认条数
pub const DEFAULT_LIST_LIMIT: usize = 20;
/// 任务列表条数上限
pub const MAX_LIST_LIMIT: usize = 200;

/// 查询单个任务
#[derive(Debug, Clone)]
pub struct GetTaskQuery {
    pub task_id: String,
}

/// 查询最近任务列表
#[derive(Debug, Clone)]
pub struct ListTasksQuery {
    pub limit: usize,
}

impl Default for ListTasksQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ListTasksQuery {
    /// 解析原始 limit 参数，非数字或超出 1..=MAX_LIST_LIMIT 时回落到默认值
    pub fn from_raw(raw: Option<&str>) -> Self {
        let limit = raw
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| (1..=MAX_LIST_LIMIT).contains(n))
            .unwrap_or(DEFAULT_LIST_LIMIT);
        Self { limit }
    }
}

/// 任务列表响应
#[derive(Debug, Clone)]
pub struct ListTasksResponse {
    pub tasks: Vec<AnalysisTask>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_parsing() {
        assert_eq!(ListTasksQuery::from_raw(None).limit, 20);
        assert_eq!(ListTasksQuery::from_raw(Some("5")).limit, 5);
        assert_eq!(ListTasksQuery::from_raw(Some(" 50 ")).limit, 50);
        assert_eq!(ListTasksQuery::from_raw(Some("abc")).limit, 20);
        assert_eq!(ListTasksQuery::from_raw(Some("0")).limit, 20);
        assert_eq!(ListTasksQuery::from_raw(Some("-3")).limit, 20);
        assert_eq!(ListTasksQuery::from_raw(Some("100000")).limit, 20);
        assert_eq!(ListTasksQuery::from_raw(Some("")).limit, 20);
    }
}
