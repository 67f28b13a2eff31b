//! In-memory port doubles shared by use case and router tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::GatewayUnavailable;
use super::image_repository::ImageRepository;
use super::mailer::{MailReceipt, Mailer, PasswordReset};
use super::object_storage::ObjectStorage;
use super::supplier_repository::SupplierRepository;
use super::user_repository::{DuplicateLogin, NewUserRow, UserCredentials, UserRepository};
use super::work_repository::WorkRepository;
use super::work_supplier_repository::WorkSupplierRepository;
use crate::domain::catalog::image::Image;
use crate::domain::catalog::supplier::{Supplier, WorkSupplierLink};
use crate::domain::catalog::work::{Work, WorkSupplier};
use crate::domain::users::user::User;

#[derive(Default)]
struct Tables {
    next_id: i64,
    works: BTreeMap<i64, Work>,
    suppliers: BTreeMap<i64, Supplier>,
    links: BTreeMap<i64, WorkSupplierLink>,
    images: BTreeMap<i64, Image>,
    users: BTreeMap<i64, UserCredentials>,
}

impl Tables {
    fn next(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    /// Behaves like an exhausted pool.
    Unavailable,
    /// Behaves like a constraint violation.
    Internal,
}

/// One struct backing every repository port, so joins see the same rows.
#[derive(Default)]
pub struct InMemoryCatalog {
    tables: Mutex<Tables>,
    failure: Mutex<Option<Failure>>,
    delay: Mutex<Option<Duration>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, failure: Failure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    pub fn delay_reads(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn image_count(&self) -> usize {
        self.tables.lock().unwrap().images.len()
    }

    pub fn stored_password_hash(&self, login: &str) -> Option<String> {
        self.tables
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.user.login == login)
            .map(|u| u.password_hash.clone())
    }

    /// Inserts without the unique-login check, like rows in a table created before it existed.
    pub fn insert_legacy_user(&self, row: &NewUserRow) -> i64 {
        let mut t = self.tables.lock().unwrap();
        Self::push_user(&mut t, row)
    }

    fn push_user(t: &mut Tables, row: &NewUserRow) -> i64 {
        let id = t.next();
        t.users.insert(
            id,
            UserCredentials {
                user: User {
                    id,
                    first_name: row.first_name.clone(),
                    last_name: row.last_name.clone(),
                    login: row.login.clone(),
                    email: row.email.clone(),
                    is_admin: row.is_admin,
                },
                password_hash: row.password_hash.clone(),
            },
        );
        id
    }

    async fn guard(&self) -> anyhow::Result<()> {
        let delay = *self.delay.lock().unwrap();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        let failure = *self.failure.lock().unwrap();
        match failure {
            Some(Failure::Unavailable) => Err(sqlx::Error::PoolTimedOut.into()),
            Some(Failure::Internal) => Err(anyhow::anyhow!(
                "Duplicate entry 'secret-detail' for key 'PRIMARY'"
            )),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WorkRepository for InMemoryCatalog {
    async fn list_works(&self) -> anyhow::Result<Vec<Work>> {
        self.guard().await?;
        Ok(self.tables.lock().unwrap().works.values().cloned().collect())
    }

    async fn insert_work(&self, name: &str) -> anyhow::Result<i64> {
        self.guard().await?;
        let mut t = self.tables.lock().unwrap();
        let id = t.next();
        t.works.insert(
            id,
            Work {
                id,
                name: name.to_string(),
            },
        );
        Ok(id)
    }

    async fn delete_work(&self, id: i64) -> anyhow::Result<bool> {
        self.guard().await?;
        Ok(self.tables.lock().unwrap().works.remove(&id).is_some())
    }

    async fn list_work_suppliers(&self, work_id: i64) -> anyhow::Result<Vec<WorkSupplier>> {
        self.guard().await?;
        let t = self.tables.lock().unwrap();
        Ok(t.links
            .values()
            .filter(|l| l.work_id == work_id)
            .filter_map(|l| {
                t.suppliers.get(&l.supplier_id).map(|s| WorkSupplier {
                    supplier_id: s.id,
                    supplier_name: s.name.clone(),
                    work_id: l.work_id,
                })
            })
            .collect())
    }
}

#[async_trait]
impl SupplierRepository for InMemoryCatalog {
    async fn list_suppliers(&self) -> anyhow::Result<Vec<Supplier>> {
        self.guard().await?;
        Ok(self.tables.lock().unwrap().suppliers.values().cloned().collect())
    }

    async fn insert_supplier(&self, name: &str) -> anyhow::Result<i64> {
        self.guard().await?;
        let mut t = self.tables.lock().unwrap();
        let id = t.next();
        t.suppliers.insert(
            id,
            Supplier {
                id,
                name: name.to_string(),
            },
        );
        Ok(id)
    }

    async fn delete_supplier(&self, id: i64) -> anyhow::Result<bool> {
        self.guard().await?;
        Ok(self.tables.lock().unwrap().suppliers.remove(&id).is_some())
    }
}

#[async_trait]
impl WorkSupplierRepository for InMemoryCatalog {
    async fn list_links(&self) -> anyhow::Result<Vec<WorkSupplierLink>> {
        self.guard().await?;
        Ok(self.tables.lock().unwrap().links.values().cloned().collect())
    }

    async fn insert_link(&self, supplier_id: i64, work_id: i64) -> anyhow::Result<i64> {
        self.guard().await?;
        let mut t = self.tables.lock().unwrap();
        let id = t.next();
        t.links.insert(
            id,
            WorkSupplierLink {
                id,
                supplier_id,
                work_id,
            },
        );
        Ok(id)
    }

    async fn delete_link(&self, id: i64) -> anyhow::Result<bool> {
        self.guard().await?;
        Ok(self.tables.lock().unwrap().links.remove(&id).is_some())
    }
}

#[async_trait]
impl ImageRepository for InMemoryCatalog {
    async fn list_images(&self) -> anyhow::Result<Vec<Image>> {
        self.guard().await?;
        Ok(self.tables.lock().unwrap().images.values().cloned().collect())
    }

    async fn insert_image(
        &self,
        url: &str,
        supplier_id: Option<i64>,
        work_id: Option<i64>,
    ) -> anyhow::Result<i64> {
        self.guard().await?;
        let mut t = self.tables.lock().unwrap();
        let id = t.next();
        t.images.insert(
            id,
            Image {
                id,
                url: url.to_string(),
                supplier_id,
                work_id,
            },
        );
        Ok(id)
    }

    async fn delete_image(&self, id: i64) -> anyhow::Result<bool> {
        self.guard().await?;
        Ok(self.tables.lock().unwrap().images.remove(&id).is_some())
    }

    async fn list_image_urls(&self, work_id: i64, supplier_id: i64) -> anyhow::Result<Vec<String>> {
        self.guard().await?;
        Ok(self
            .tables
            .lock()
            .unwrap()
            .images
            .values()
            .filter(|i| i.work_id == Some(work_id) && i.supplier_id == Some(supplier_id))
            .map(|i| i.url.clone())
            .collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryCatalog {
    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        self.guard().await?;
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .values()
            .map(|u| u.user.clone())
            .collect())
    }

    async fn insert_user(&self, row: &NewUserRow) -> anyhow::Result<i64> {
        self.guard().await?;
        let mut t = self.tables.lock().unwrap();
        if t.users.values().any(|u| u.user.login == row.login) {
            return Err(DuplicateLogin {
                login: row.login.clone(),
            }
            .into());
        }
        Ok(Self::push_user(&mut t, row))
    }

    async fn delete_user(&self, id: i64) -> anyhow::Result<bool> {
        self.guard().await?;
        Ok(self.tables.lock().unwrap().users.remove(&id).is_some())
    }

    async fn find_by_login(&self, login: &str) -> anyhow::Result<Vec<UserCredentials>> {
        self.guard().await?;
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .values()
            .filter(|u| u.user.login == login)
            .cloned()
            .collect())
    }
}

/// Object storage double that records containers and objects.
#[derive(Default)]
pub struct RecordingStorage {
    pub containers: Mutex<BTreeSet<String>>,
    pub objects: Mutex<BTreeMap<(String, String), Vec<u8>>>,
    fail_uploads: Mutex<bool>,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_uploads(&self) {
        *self.fail_uploads.lock().unwrap() = true;
    }

    pub fn object_keys(&self) -> Vec<(String, String)> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn has_container(&self, name: &str) -> bool {
        self.containers.lock().unwrap().contains(name)
    }
}

#[async_trait]
impl ObjectStorage for RecordingStorage {
    async fn ensure_container(&self, container: &str) -> anyhow::Result<()> {
        self.containers
            .lock()
            .unwrap()
            .insert(container.to_string());
        Ok(())
    }

    async fn upload(
        &self,
        container: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> anyhow::Result<String> {
        if *self.fail_uploads.lock().unwrap() {
            anyhow::bail!("AuthorizationFailure: signature mismatch for account key");
        }
        self.objects
            .lock()
            .unwrap()
            .insert((container.to_string(), key.to_string()), bytes);
        Ok(format!("https://blobs.test/{}/{}", container, key))
    }

    async fn delete_object(&self, container: &str, key: &str) -> anyhow::Result<()> {
        self.objects
            .lock()
            .unwrap()
            .remove(&(container.to_string(), key.to_string()));
        Ok(())
    }
}

/// Mailer double that keeps every message it was asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<PasswordReset>>,
    disabled: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disabled() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            disabled: true,
        }
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_password_reset(&self, reset: &PasswordReset) -> anyhow::Result<MailReceipt> {
        if self.disabled {
            return Err(GatewayUnavailable {
                gateway: "mail relay",
                reason: "SMTP credentials are not configured".into(),
            }
            .into());
        }
        self.sent.lock().unwrap().push(reset.clone());
        Ok(MailReceipt {
            code: "250".into(),
            message: vec!["2.0.0 OK".into()],
        })
    }
}
