//! Config Command Handlers

use std::sync::Arc;

use crate::application::commands::config_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::ConfigStorePort;

/// UpdateStockList Handler - 保存自选股列表
pub struct UpdateStockListHandler {
    config_store: Arc<dyn ConfigStorePort>,
}

impl UpdateStockListHandler {
    pub fn new(config_store: Arc<dyn ConfigStorePort>) -> Self {
        Self { config_store }
    }

    pub fn handle(
        &self,
        cmd: UpdateStockListCommand,
    ) -> Result<UpdateStockListResponse, ApplicationError> {
        let stock_list = self.config_store.set_stock_list(&cmd.stock_list)?;
        tracing::info!(stock_list = %stock_list, "Stock list updated");

        Ok(UpdateStockListResponse {
            stock_list,
            env_filename: self.config_store.env_filename(),
        })
    }
}
