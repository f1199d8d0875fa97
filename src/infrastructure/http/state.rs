//! Application State
//!
//! 进程启动时构造一次，所有依赖显式注入

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{
    // Command handlers
    SubmitAnalysisHandler, UpdateStockListHandler,
    // Query handlers
    GetReportHandler, GetStockListHandler, GetTaskHandler, ListTasksHandler,
    // Ports
    ConfigStorePort, TaskManagerPort, WebhookPort,
};
use crate::domain::ReportRenderer;
use crate::infrastructure::http::templates::PageTemplates;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub task_manager: Arc<dyn TaskManagerPort>,
    pub config_store: Arc<dyn ConfigStorePort>,
    pub webhook: Arc<dyn WebhookPort>,
    pub pages: PageTemplates,

    // ========== Command Handlers ==========
    pub submit_analysis_handler: SubmitAnalysisHandler,
    pub update_stock_list_handler: UpdateStockListHandler,

    // ========== Query Handlers ==========
    pub get_task_handler: GetTaskHandler,
    pub list_tasks_handler: ListTasksHandler,
    pub get_report_handler: GetReportHandler,
    pub get_stock_list_handler: GetStockListHandler,
}

impl AppState {
    /// 创建应用状态
    ///
    /// `working_dir` 为相对报告路径的解析基准
    pub fn new(
        task_manager: Arc<dyn TaskManagerPort>,
        config_store: Arc<dyn ConfigStorePort>,
        webhook: Arc<dyn WebhookPort>,
        renderer: ReportRenderer,
        pages: PageTemplates,
        working_dir: PathBuf,
    ) -> Self {
        Self {
            // Ports
            task_manager: task_manager.clone(),
            config_store: config_store.clone(),
            webhook,
            pages,

            // Command handlers
            submit_analysis_handler: SubmitAnalysisHandler::new(task_manager.clone()),
            update_stock_list_handler: UpdateStockListHandler::new(config_store.clone()),

            // Query handlers
            get_task_handler: GetTaskHandler::new(task_manager.clone()),
            list_tasks_handler: ListTasksHandler::new(task_manager.clone()),
            get_report_handler: GetReportHandler::new(task_manager, renderer, working_dir),
            get_stock_list_handler: GetStockListHandler::new(config_store),
        }
    }
}
