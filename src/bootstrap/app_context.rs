use std::sync::Arc;

use crate::application::ports::image_repository::ImageRepository;
use crate::application::ports::mailer::Mailer;
use crate::application::ports::object_storage::ObjectStorage;
use crate::application::ports::supplier_repository::SupplierRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::ports::work_repository::WorkRepository;
use crate::application::ports::work_supplier_repository::WorkSupplierRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    work_repo: Arc<dyn WorkRepository>,
    supplier_repo: Arc<dyn SupplierRepository>,
    work_supplier_repo: Arc<dyn WorkSupplierRepository>,
    image_repo: Arc<dyn ImageRepository>,
    user_repo: Arc<dyn UserRepository>,
    object_storage: Arc<dyn ObjectStorage>,
    mailer: Arc<dyn Mailer>,
}

impl AppServices {
    pub fn new(
        work_repo: Arc<dyn WorkRepository>,
        supplier_repo: Arc<dyn SupplierRepository>,
        work_supplier_repo: Arc<dyn WorkSupplierRepository>,
        image_repo: Arc<dyn ImageRepository>,
        user_repo: Arc<dyn UserRepository>,
        object_storage: Arc<dyn ObjectStorage>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            work_repo,
            supplier_repo,
            work_supplier_repo,
            image_repo,
            user_repo,
            object_storage,
            mailer,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn work_repo(&self) -> Arc<dyn WorkRepository> {
        self.services.work_repo.clone()
    }

    pub fn supplier_repo(&self) -> Arc<dyn SupplierRepository> {
        self.services.supplier_repo.clone()
    }

    pub fn work_supplier_repo(&self) -> Arc<dyn WorkSupplierRepository> {
        self.services.work_supplier_repo.clone()
    }

    pub fn image_repo(&self) -> Arc<dyn ImageRepository> {
        self.services.image_repo.clone()
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn object_storage(&self) -> Arc<dyn ObjectStorage> {
        self.services.object_storage.clone()
    }

    pub fn mailer(&self) -> Arc<dyn Mailer> {
        self.services.mailer.clone()
    }
}
