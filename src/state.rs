use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub milestones: Arc<[u32]>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, milestones: Vec<u32>) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            milestones: milestones.into(),
        }
    }
}
