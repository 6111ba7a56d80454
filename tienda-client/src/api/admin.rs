//! Admin back-office endpoints

use super::StorefrontClient;
use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use shared::models::{
    Category, CategoryForm, OrderStatus, OrderStatusPayload, Product, ProductForm, Role,
    StatusReorder, User, UserPayload,
};

/// Back-office CRUD operations
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_categories(&self) -> ClientResult<Vec<Category>>;
    async fn create_category(&self, form: &CategoryForm) -> ClientResult<Category>;
    async fn update_category(&self, id: i64, form: &CategoryForm) -> ClientResult<Category>;
    /// Only flips the active flag
    async fn set_category_active(&self, id: i64, active: bool) -> ClientResult<Category>;
    async fn delete_category(&self, id: i64) -> ClientResult<()>;

    async fn list_order_statuses(&self) -> ClientResult<Vec<OrderStatus>>;
    async fn create_order_status(&self, payload: &OrderStatusPayload) -> ClientResult<OrderStatus>;
    async fn update_order_status(
        &self,
        id: i64,
        payload: &OrderStatusPayload,
    ) -> ClientResult<OrderStatus>;
    async fn delete_order_status(&self, id: i64) -> ClientResult<()>;
    /// Returns the full, reordered list
    async fn reorder_order_statuses(&self, reorder: &StatusReorder)
    -> ClientResult<Vec<OrderStatus>>;

    async fn list_products(&self) -> ClientResult<Vec<Product>>;
    async fn create_product(&self, form: &ProductForm) -> ClientResult<Product>;
    async fn update_product(&self, id: i64, form: &ProductForm) -> ClientResult<Product>;
    async fn set_product_active(&self, id: i64, active: bool) -> ClientResult<Product>;
    async fn delete_product(&self, id: i64) -> ClientResult<()>;

    async fn list_users(&self) -> ClientResult<Vec<User>>;
    async fn list_roles(&self) -> ClientResult<Vec<Role>>;
    async fn register_user(&self, payload: &UserPayload) -> ClientResult<User>;
    async fn update_user(&self, id: i64, payload: &UserPayload) -> ClientResult<User>;
    async fn delete_user(&self, id: i64) -> ClientResult<()>;
}

fn text_form(fields: Vec<(&'static str, String)>) -> Form {
    fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value))
}

fn product_form(form: &ProductForm) -> ClientResult<Form> {
    let mut multipart = text_form(form.multipart_fields());
    if let Some(image) = &form.imagen {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)?;
        multipart = multipart.part("imagen", part);
    }
    Ok(multipart)
}

#[async_trait]
impl AdminApi for StorefrontClient {
    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.http.get("api/categorias").await
    }

    async fn create_category(&self, form: &CategoryForm) -> ClientResult<Category> {
        self.http
            .post_multipart("api/categorias", text_form(form.multipart_fields()))
            .await
    }

    async fn update_category(&self, id: i64, form: &CategoryForm) -> ClientResult<Category> {
        self.http
            .put_multipart(
                &format!("api/categorias/{}", id),
                text_form(form.multipart_fields()),
            )
            .await
    }

    async fn set_category_active(&self, id: i64, active: bool) -> ClientResult<Category> {
        let form = Form::new().text("estado", active.to_string());
        self.http
            .put_multipart(&format!("api/categorias/{}", id), form)
            .await
    }

    async fn delete_category(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("api/categorias/{}", id)).await
    }

    async fn list_order_statuses(&self) -> ClientResult<Vec<OrderStatus>> {
        self.http.get("api/estados").await
    }

    async fn create_order_status(&self, payload: &OrderStatusPayload) -> ClientResult<OrderStatus> {
        self.http
            .post("api/estados", payload)
            .await
            .map_err(|e| e.or_message("Error en la operación"))
    }

    async fn update_order_status(
        &self,
        id: i64,
        payload: &OrderStatusPayload,
    ) -> ClientResult<OrderStatus> {
        self.http
            .put(&format!("api/estados/{}", id), payload)
            .await
            .map_err(|e| e.or_message("Error en la operación"))
    }

    async fn delete_order_status(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("api/estados/{}", id)).await
    }

    async fn reorder_order_statuses(
        &self,
        reorder: &StatusReorder,
    ) -> ClientResult<Vec<OrderStatus>> {
        self.http
            .put("api/estados/orden/actualizar", reorder)
            .await
            .map_err(|e| e.or_message("Error al actualizar el orden"))
    }

    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.http.get("api/products").await
    }

    async fn create_product(&self, form: &ProductForm) -> ClientResult<Product> {
        self.http
            .post_multipart("api/products", product_form(form)?)
            .await
    }

    async fn update_product(&self, id: i64, form: &ProductForm) -> ClientResult<Product> {
        self.http
            .put_multipart(&format!("api/products/{}", id), product_form(form)?)
            .await
    }

    async fn set_product_active(&self, id: i64, active: bool) -> ClientResult<Product> {
        let form = Form::new().text("estado", active.to_string());
        self.http
            .put_multipart(&format!("api/products/{}", id), form)
            .await
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("api/products/{}", id)).await
    }

    async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.http.get("api/usuarios").await
    }

    async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        self.http.get("api/roles").await
    }

    async fn register_user(&self, payload: &UserPayload) -> ClientResult<User> {
        self.http
            .post("api/usuarios/register", payload)
            .await
            .map_err(|e| e.or_message("Error al guardar usuario"))
    }

    async fn update_user(&self, id: i64, payload: &UserPayload) -> ClientResult<User> {
        self.http
            .put(&format!("api/usuarios/update/{}", id), payload)
            .await
            .map_err(|e| e.or_message("Error al guardar usuario"))
    }

    async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete(&format!("api/usuarios/delete/{}", id))
            .await
            .map_err(|e| e.or_message("Error al eliminar usuario"))
    }
}
