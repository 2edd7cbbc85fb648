pub mod metrics;
pub mod queues;
pub mod record;
pub mod scenario;
