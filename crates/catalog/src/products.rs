use storefront_http::HttpClient;
use storefront_types::{
    ApiRequest, CreateProductDto, Product, ProductWithTax, UpdateProductDto, traits::Result,
};
use tracing::instrument;

use crate::{Calculator, LookupError};

/// Path of the product collection.
pub const PRODUCTS_PATH: &str = "/api/v1/products";

/// Rate applied to the price to derive `taxes`.
pub const TAX_RATE: f64 = 0.19;

/// `price * TAX_RATE`, floored at zero.
#[must_use]
pub fn taxes_for(price: f64) -> f64 {
    Calculator::multiply(price, TAX_RATE).max(0.0)
}

fn with_taxes(product: Product) -> ProductWithTax {
    let taxes = taxes_for(product.price);
    ProductWithTax { product, taxes }
}

fn paginate(request: ApiRequest, limit: Option<u32>, offset: Option<u32>) -> ApiRequest {
    let request = match limit {
        Some(limit) => request.param("limit", limit),
        None => request,
    };
    match offset {
        Some(offset) => request.param("offset", offset),
        None => request,
    }
}

/// Network operations on the product resource.
#[derive(Clone)]
pub struct ProductGateway {
    client: HttpClient,
}

impl ProductGateway {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    fn collection(&self) -> String {
        self.client.endpoint(PRODUCTS_PATH)
    }

    fn item(&self, id: &str) -> String {
        format!("{}/{id}", self.collection())
    }

    /// Lists products exactly as the server returns them.
    ///
    /// # Errors
    ///
    /// Propagates transport, upstream and decoding errors.
    #[instrument(skip(self))]
    pub async fn get_all_simple(&self) -> Result<Vec<Product>> {
        self.client.send_json(ApiRequest::get(self.collection())).await
    }

    /// Lists products with the derived `taxes` field.
    ///
    /// `limit` and `offset` are sent as query parameters only when given.
    ///
    /// # Errors
    ///
    /// Propagates transport, upstream and decoding errors.
    #[instrument(skip(self))]
    pub async fn get_all(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<ProductWithTax>> {
        let request = paginate(ApiRequest::get(self.collection()), limit, offset);
        let products: Vec<Product> = self.client.send_json(request).await?;
        Ok(products.into_iter().map(with_taxes).collect())
    }

    /// Fetches one product.
    ///
    /// # Errors
    ///
    /// Every failure is reduced to a [`LookupError`]; the raw status text and
    /// body are only logged.
    #[instrument(skip(self))]
    pub async fn get_one(&self, id: &str) -> std::result::Result<Product, LookupError> {
        self.fetch(id).await.map_err(|err| {
            tracing::debug!(error = %err, "product lookup failed");
            LookupError::from(err)
        })
    }

    async fn fetch(&self, id: &str) -> Result<Product> {
        self.client.send_json(ApiRequest::get(self.item(id))).await
    }

    /// Creates a product from `dto` and returns the stored entity.
    ///
    /// # Errors
    ///
    /// Propagates transport, upstream and decoding errors.
    #[instrument(skip(self, dto), fields(title = %dto.title))]
    pub async fn create(&self, dto: &CreateProductDto) -> Result<Product> {
        let request = ApiRequest::post(self.collection()).body(serde_json::to_value(dto)?);
        self.client.send_json(request).await
    }

    /// Applies a sparse patch to product `id`.
    ///
    /// # Errors
    ///
    /// Propagates transport, upstream and decoding errors.
    #[instrument(skip(self, dto))]
    pub async fn update(&self, id: &str, dto: &UpdateProductDto) -> Result<Product> {
        let request = ApiRequest::put(self.item(id)).body(serde_json::to_value(dto)?);
        self.client.send_json(request).await
    }

    /// Deletes product `id`, returning the server's boolean verdict.
    ///
    /// # Errors
    ///
    /// Propagates transport, upstream and decoding errors.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.client.send_json(ApiRequest::delete(self.item(id))).await
    }

    /// Lists the products of one category, without the tax transform.
    ///
    /// # Errors
    ///
    /// Propagates transport, upstream and decoding errors.
    #[instrument(skip(self))]
    pub async fn get_by_category(
        &self,
        category_id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Product>> {
        let url = self
            .client
            .endpoint(&format!("/api/v1/categories/{category_id}/products"));
        self.client
            .send_json(paginate(ApiRequest::get(url), limit, offset))
            .await
    }

    /// Reads product `id` and patches it concurrently.
    ///
    /// Returns `(before, after)` as the server reported them. The two requests
    /// are not ordered, so `before` may already reflect the patch.
    ///
    /// # Errors
    ///
    /// Fails with the first error either request reports, unmodified.
    #[instrument(skip(self, dto))]
    pub async fn read_and_update(
        &self,
        id: &str,
        dto: &UpdateProductDto,
    ) -> Result<(Product, Product)> {
        tokio::try_join!(self.fetch(id), self.update(id, dto))
    }
}
