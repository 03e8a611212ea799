pub mod analytics_service;
pub mod merge_service;
pub mod profit_sharing_service;
pub mod sync_service;
