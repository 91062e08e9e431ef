//! Admin panel: login gate, item list and item form

use crate::api::AdminApi;
use crate::{ClientError, ClientResult};
use shared::{CatalogItem, CatalogSchema, ItemForm};
use std::path::Path;

/// Admin view currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    List,
    /// Item form; `None` creates a new item
    Form(Option<String>),
}

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Admin panel state
#[derive(Debug, Clone)]
pub struct AdminPanel {
    api: AdminApi,
    schema: CatalogSchema,
    route: Route,
    items: Vec<CatalogItem>,
    form: ItemForm,
    error: Option<String>,
}

impl AdminPanel {
    /// Starts on the list when a token is already stored
    pub fn new(api: AdminApi, schema: CatalogSchema) -> Self {
        let route = if api.session().is_authenticated() {
            Route::List
        } else {
            Route::Login
        };
        Self {
            api,
            schema,
            route,
            items: Vec::new(),
            form: ItemForm::new(),
            error: None,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn schema(&self) -> &CatalogSchema {
        &self.schema
    }

    pub fn api(&self) -> &AdminApi {
        &self.api
    }

    pub fn form(&self) -> &ItemForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ItemForm {
        &mut self.form
    }

    /// Record a failure; auth failures send the user back to login
    fn fail(&mut self, err: ClientError) {
        if err.is_auth_failure() {
            tracing::info!("admin token rejected, returning to login");
            self.route = Route::Login;
        }
        tracing::warn!(error = %err, "admin action failed");
        self.error = Some(err.user_message());
    }

    fn settle<T>(&mut self, result: ClientResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    pub async fn login(&mut self, user: &str, pass: &str) -> bool {
        self.error = None;
        let result = self.api.login(user, pass).await;
        if self.settle(result).is_none() {
            return false;
        }
        self.route = Route::List;
        self.load().await
    }

    /// Refetch the full admin list
    pub async fn load(&mut self) -> bool {
        let result = self.api.list().await;
        match self.settle(result) {
            Some(items) => {
                self.items = items;
                true
            }
            None => false,
        }
    }

    /// Delete after confirmation, then refetch. Declining sends nothing.
    pub async fn delete(&mut self, id: &str, confirm: &mut impl Confirm) -> bool {
        let title = self
            .items
            .iter()
            .find(|item| item.id == id)
            .map(|item| shared::view::item_title(item, &self.schema))
            .unwrap_or_else(|| id.to_string());
        if !confirm.confirm(&format!("¿Eliminar \"{}\"?", title)) {
            tracing::debug!(id, "delete declined");
            return false;
        }

        self.error = None;
        let result = self.api.delete(id).await;
        if self.settle(result).is_none() {
            return false;
        }
        self.load().await
    }

    /// Open the form on an existing item, found through the admin list
    pub async fn edit(&mut self, id: &str) -> bool {
        self.error = None;
        self.route = Route::Form(Some(id.to_string()));
        let result = self.api.find(id).await;
        match self.settle(result) {
            Some(item) => {
                self.form = ItemForm::from_item(&item, &self.schema);
                true
            }
            None => false,
        }
    }

    /// Open an empty form
    pub fn new_item(&mut self) {
        self.error = None;
        self.form = ItemForm::blank(&self.schema);
        self.route = Route::Form(None);
    }

    /// Back to the list without saving
    pub fn cancel(&mut self) {
        self.route = Route::List;
    }

    /// Create or update from the form, then return to the refreshed list
    pub async fn save(&mut self) -> bool {
        self.error = None;
        let payload = match self.form.to_payload(&self.schema) {
            Ok(payload) => payload,
            Err(e) => {
                self.fail(e.into());
                return false;
            }
        };

        let result = match &self.route {
            Route::Form(Some(id)) => self.api.update(id, &payload).await,
            _ => self.api.create(&payload).await,
        };
        if self.settle(result).is_none() {
            return false;
        }
        self.route = Route::List;
        self.load().await
    }

    /// Upload photos into the form
    pub async fn upload<P: AsRef<Path>>(&mut self, files: &[P]) -> bool {
        self.error = None;
        let result = self.api.upload_paths(files).await;
        match self.settle(result) {
            Some(paths) => {
                self.form.add_uploaded(paths);
                true
            }
            None => false,
        }
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.api.logout() {
            self.error = Some(e.user_message());
        }
        self.route = Route::Login;
    }
}
