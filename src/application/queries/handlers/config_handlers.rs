//! Config Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ConfigStorePort;
use crate::application::queries::config_queries::{GetStockListQuery, StockListView};

/// GetStockList Handler
pub struct GetStockListHandler {
    config_store: Arc<dyn ConfigStorePort>,
}

impl GetStockListHandler {
    pub fn new(config_store: Arc<dyn ConfigStorePort>) -> Self {
        Self { config_store }
    }

    pub fn handle(&self, _query: GetStockListQuery) -> Result<StockListView, ApplicationError> {
        Ok(StockListView {
            stock_list: self.config_store.stock_list()?,
            env_filename: self.config_store.env_filename(),
        })
    }
}
