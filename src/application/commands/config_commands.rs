//! Config Commands - 配置页写操作

/// 更新自选股列表
#[derive(Debug, Clone)]
pub struct UpdateStockListCommand {
    pub stock_list: String,
}

/// 更新结果
#[derive(Debug, Clone)]
pub struct UpdateStockListResponse {
    pub stock_list: String,
    pub env_filename: String,
}
