//! In-memory store used by the integration tests.
//!
//! `MemoryStore` implements `UnitOfWork`: `begin` snapshots the committed
//! tables into a `MemoryTx`, repository calls mutate the snapshot, and only
//! `commit` publishes it. Counters and failure switches let tests observe
//! the commit-or-rollback discipline.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use common::{AppError, AppResult};
use domain::{
    Argon2Codec, CredentialCodec, Customer, CustomerCredentials, CustomerUpdate, NewProduct,
    Product, ProductUpdate, Seller, SellerUpdate,
};
use shop_service_lib::infra::UnitOfWork;
use shop_service_lib::repository::{CustomerRepository, ProductRepository, SellerRepository};
use shop_service_lib::service::{CustomerManager, ProductManager, SellerManager};

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub customers: Vec<Customer>,
    pub sellers: Vec<Seller>,
    pub products: Vec<Product>,
    pub last_product_id: i32,
}

/// Open transaction: a private copy of the tables.
pub struct MemoryTx {
    staged: Mutex<Tables>,
    fail_writes: bool,
    stall: Option<Duration>,
}

impl MemoryTx {
    async fn enter(&self) {
        if let Some(stall) = self.stall {
            tokio::time::sleep(stall).await;
        }
    }

    fn check_write(&self) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::store_unavailable("connection reset by peer"));
        }
        Ok(())
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.staged.lock().unwrap()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    committed: Mutex<Tables>,
    begins: AtomicUsize,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
    fail_begin: AtomicBool,
    fail_commit: AtomicBool,
    fail_rollback: AtomicBool,
    fail_writes: AtomicBool,
    stall: Mutex<Option<Duration>>,
    stall_begin: Mutex<Option<Duration>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn begins(&self) -> usize {
        self.begins.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }

    /// Snapshot of what has been committed so far.
    pub fn committed(&self) -> Tables {
        self.committed.lock().unwrap().clone()
    }

    pub fn seed_customer(&self, customer: Customer) {
        self.committed.lock().unwrap().customers.push(customer);
    }

    pub fn seed_product(&self, product: Product) {
        let mut tables = self.committed.lock().unwrap();
        tables.last_product_id = tables.last_product_id.max(product.id);
        tables.products.push(product);
    }

    pub fn fail_begin(&self) {
        self.fail_begin.store(true, Ordering::SeqCst);
    }

    pub fn fail_commit(&self) {
        self.fail_commit.store(true, Ordering::SeqCst);
    }

    pub fn fail_rollback(&self) {
        self.fail_rollback.store(true, Ordering::SeqCst);
    }

    /// Every repository write in later transactions fails.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Every repository call in later transactions sleeps first.
    pub fn stall(&self, duration: Duration) {
        *self.stall.lock().unwrap() = Some(duration);
    }

    /// Every later `begin` waits this long for a connection.
    pub fn stall_begin(&self, duration: Duration) {
        *self.stall_begin.lock().unwrap() = Some(duration);
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> AppResult<MemoryTx> {
        let stall_begin = *self.stall_begin.lock().unwrap();
        if let Some(stall) = stall_begin {
            tokio::time::sleep(stall).await;
        }
        if self.fail_begin.load(Ordering::SeqCst) {
            return Err(AppError::store_unavailable("no connection available"));
        }
        self.begins.fetch_add(1, Ordering::SeqCst);

        Ok(MemoryTx {
            staged: Mutex::new(self.committed()),
            fail_writes: self.fail_writes.load(Ordering::SeqCst),
            stall: *self.stall.lock().unwrap(),
        })
    }

    async fn commit(&self, tx: MemoryTx) -> AppResult<()> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(AppError::store_unavailable("commit failed"));
        }
        *self.committed.lock().unwrap() = tx.staged.into_inner().unwrap();
        Ok(())
    }

    async fn rollback(&self, tx: MemoryTx) -> AppResult<()> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        drop(tx);
        if self.fail_rollback.load(Ordering::SeqCst) {
            return Err(AppError::store_unavailable("rollback failed"));
        }
        Ok(())
    }
}

pub struct MemoryCustomers;

#[async_trait]
impl CustomerRepository<MemoryTx> for MemoryCustomers {
    async fn register_customer(&self, tx: &MemoryTx, customer: Customer) -> AppResult<Customer> {
        tx.enter().await;
        tx.check_write()?;

        let mut tables = tx.tables();
        // Partial unique index: deleted rows free their email
        if tables
            .customers
            .iter()
            .any(|c| c.email == customer.email && !c.is_deleted())
        {
            return Err(AppError::constraint_violation("idx_customers_email_active"));
        }
        tables.customers.push(customer.clone());
        Ok(customer)
    }

    async fn login_customer(
        &self,
        tx: &MemoryTx,
        email: &str,
    ) -> AppResult<Option<CustomerCredentials>> {
        tx.enter().await;

        Ok(tx
            .tables()
            .customers
            .iter()
            .find(|c| c.email == email && !c.is_deleted())
            .map(|c| CustomerCredentials {
                id: c.id,
                password: c.password.clone(),
            }))
    }

    async fn update_customer(&self, tx: &MemoryTx, update: CustomerUpdate) -> AppResult<Customer> {
        tx.enter().await;
        tx.check_write()?;

        let mut tables = tx.tables();
        let customer = tables
            .customers
            .iter_mut()
            .find(|c| c.email == update.email && !c.is_deleted())
            .ok_or(AppError::NotFound)?;

        customer.name = update.name;
        customer.updated_at = Some(update.updated_at);
        Ok(customer.clone())
    }

    async fn delete_customer(&self, tx: &MemoryTx, email: &str, deleted_at: i64) -> AppResult<()> {
        tx.enter().await;
        tx.check_write()?;

        let mut tables = tx.tables();
        if let Some(customer) = tables
            .customers
            .iter_mut()
            .find(|c| c.email == email && !c.is_deleted())
        {
            customer.deleted_at = Some(deleted_at);
        }
        Ok(())
    }
}

pub struct MemorySellers;

#[async_trait]
impl SellerRepository<MemoryTx> for MemorySellers {
    async fn register_seller(&self, tx: &MemoryTx, seller: Seller) -> AppResult<Seller> {
        tx.enter().await;
        tx.check_write()?;

        let mut tables = tx.tables();
        if tables
            .sellers
            .iter()
            .any(|s| s.email == seller.email && !s.is_deleted())
        {
            return Err(AppError::constraint_violation("idx_sellers_email_active"));
        }
        tables.sellers.push(seller.clone());
        Ok(seller)
    }

    async fn update_seller(&self, tx: &MemoryTx, update: SellerUpdate) -> AppResult<Seller> {
        tx.enter().await;
        tx.check_write()?;

        let mut tables = tx.tables();
        let seller = tables
            .sellers
            .iter_mut()
            .find(|s| s.email == update.email && !s.is_deleted())
            .ok_or(AppError::NotFound)?;

        seller.name = update.name;
        seller.updated_at = Some(update.updated_at);
        Ok(seller.clone())
    }
}

pub struct MemoryProducts;

#[async_trait]
impl ProductRepository<MemoryTx> for MemoryProducts {
    async fn add_product(&self, tx: &MemoryTx, product: NewProduct) -> AppResult<Product> {
        tx.enter().await;
        tx.check_write()?;

        let mut tables = tx.tables();
        tables.last_product_id += 1;
        let saved = Product {
            id: tables.last_product_id,
            seller_id: product.seller_id,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            created_at: product.created_at,
            updated_at: None,
            deleted_at: None,
        };
        tables.products.push(saved.clone());
        Ok(saved)
    }

    async fn get_products(&self, tx: &MemoryTx) -> AppResult<Vec<Product>> {
        tx.enter().await;

        let mut active: Vec<Product> = tx
            .tables()
            .products
            .iter()
            .filter(|p| p.deleted_at.is_none())
            .cloned()
            .collect();
        active.sort_by_key(|p| p.id);
        Ok(active)
    }

    async fn find_by_id(&self, tx: &MemoryTx, id: i32) -> AppResult<Product> {
        tx.enter().await;

        tx.tables()
            .products
            .iter()
            .find(|p| p.id == id && p.deleted_at.is_none())
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn update_product(&self, tx: &MemoryTx, update: ProductUpdate) -> AppResult<Product> {
        tx.enter().await;
        tx.check_write()?;

        let mut tables = tx.tables();
        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == update.id && p.deleted_at.is_none())
            .ok_or(AppError::NotFound)?;

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(quantity) = update.quantity {
            product.quantity = quantity;
        }
        product.updated_at = Some(update.updated_at);
        Ok(product.clone())
    }

    async fn delete_product(&self, tx: &MemoryTx, id: i32, deleted_at: i64) -> AppResult<()> {
        tx.enter().await;
        tx.check_write()?;

        let mut tables = tx.tables();
        if let Some(product) = tables
            .products
            .iter_mut()
            .find(|p| p.id == id && p.deleted_at.is_none())
        {
            product.deleted_at = Some(deleted_at);
        }
        Ok(())
    }
}

/// Argon2id with the smallest accepted costs.
pub fn fast_codec() -> Arc<dyn CredentialCodec> {
    Arc::new(Argon2Codec::new(8, 1, 1).unwrap())
}

pub fn customer_manager(
    store: &Arc<MemoryStore>,
    codec: Arc<dyn CredentialCodec>,
) -> CustomerManager<MemoryStore> {
    CustomerManager::new(store.clone(), Arc::new(MemoryCustomers), codec)
}

pub fn seller_manager(
    store: &Arc<MemoryStore>,
    codec: Arc<dyn CredentialCodec>,
) -> SellerManager<MemoryStore> {
    SellerManager::new(store.clone(), Arc::new(MemorySellers), codec)
}

pub fn product_manager(store: &Arc<MemoryStore>) -> ProductManager<MemoryStore> {
    ProductManager::new(store.clone(), Arc::new(MemoryProducts))
}
