//! Config Queries - 配置页读取

/// 读取自选股配置
#[derive(Debug, Clone, Default)]
pub struct GetStockListQuery;

#[derive(Debug, Clone)]
pub struct StockListView {
    pub stock_list: String,
    pub env_filename: String,
}
