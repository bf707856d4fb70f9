//! HTTP-адаптеры для эндпоинтов коллекции и удаления.

use async_trait::async_trait;
use contracts::shared::bulk_delete::DeleteItemResult;
use contracts::shared::list_query::ListQuery;
use contracts::shared::paginated::Paginated;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use super::binder::{BinderError, CollectionSource};
use super::bulk::DeletionSink;
use crate::shared::api_utils::api_base;

/// `{api}/api/{tenant}/{collection}`; `tenant` и `id` кодируются,
/// `collection` берётся из конфигурации как есть.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCollection {
    base_url: String,
}

impl HttpCollection {
    pub fn new(tenant: &str, collection: &str) -> Self {
        Self::with_base(&api_base(), tenant, collection)
    }

    pub fn with_base(api_base: &str, tenant: &str, collection: &str) -> Self {
        Self {
            base_url: format!(
                "{}/api/{}/{}",
                api_base.trim_end_matches('/'),
                urlencoding::encode(tenant),
                collection
            ),
        }
    }

    pub fn list_url(&self, query: &ListQuery) -> Result<String, BinderError> {
        let qs = serde_qs::to_string(query).map_err(|e| BinderError::Query(e.to_string()))?;
        Ok(format!("{}?{}", self.base_url, qs))
    }

    pub fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(id))
    }
}

async fn error_message(response: Response) -> String {
    let status_text = response.status_text();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        _ => status_text,
    }
}

#[async_trait(?Send)]
impl<T: DeserializeOwned + 'static> CollectionSource<T> for HttpCollection {
    async fn fetch_page(&self, query: &ListQuery) -> Result<Paginated<T>, BinderError> {
        let url = self.list_url(query)?;
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| BinderError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(BinderError::Status {
                status: response.status(),
                message: error_message(response).await,
            });
        }
        response
            .json::<Paginated<T>>()
            .await
            .map_err(|e| BinderError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl DeletionSink for HttpCollection {
    async fn delete_one(&self, id: &str) -> DeleteItemResult {
        let response = match Request::delete(&self.item_url(id)).send().await {
            Ok(r) => r,
            Err(e) => return DeleteItemResult::failed(id, e.to_string()),
        };
        if response.ok() {
            DeleteItemResult::ok(id)
        } else {
            let status = response.status();
            let message = error_message(response).await;
            DeleteItemResult::failed(id, format!("{status}: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::list_query::{DateFilterMode, SortDirection};

    #[test]
    fn test_list_url_uses_collection_query_names() {
        let api = HttpCollection::with_base("http://localhost:3000/", "store-7", "products");
        let query = ListQuery {
            page: 2,
            per_page: 25,
            search: "kopi".into(),
            sort: "product_name".into(),
            direction: Some(SortDirection::Asc),
            filter_column: "unit".into(),
            filter_value: "pcs".into(),
            ..ListQuery::default()
        };
        assert_eq!(
            api.list_url(&query).unwrap(),
            "http://localhost:3000/api/store-7/products?page=2&per_page=25&search=kopi\
             &sort=product_name&direction=asc&filterColumn=unit&filterValue=pcs"
        );
    }

    #[test]
    fn test_report_query_string() {
        let api = HttpCollection::with_base("http://localhost:3000", "s1", "reports/sales-product");
        let query = ListQuery {
            page: 1,
            per_page: 10,
            selected_date_filter: Some(DateFilterMode::Monthly),
            filter_date_value: "2024-03".into(),
            range_price_min: "1000".into(),
            ..ListQuery::default()
        };
        assert_eq!(
            api.list_url(&query).unwrap(),
            "http://localhost:3000/api/s1/reports/sales-product?page=1&per_page=10\
             &selectedDateFilter=monthly&filterDateValue=2024-03&rangePriceMin=1000"
        );
    }

    #[test]
    fn test_item_url() {
        let api = HttpCollection::with_base("http://h:3000", "s1", "categories");
        assert_eq!(api.item_url("42"), "http://h:3000/api/s1/categories/42");
    }

    #[test]
    fn test_tenant_and_id_are_percent_encoded() {
        let api = HttpCollection::with_base("http://h:3000", "toko/maju 7", "categories");
        assert_eq!(
            api.item_url("a/b?c#d"),
            "http://h:3000/api/toko%2Fmaju%207/categories/a%2Fb%3Fc%23d"
        );
        let query = ListQuery {
            page: 1,
            per_page: 10,
            ..ListQuery::default()
        };
        assert!(api
            .list_url(&query)
            .unwrap()
            .starts_with("http://h:3000/api/toko%2Fmaju%207/categories?"));
    }
}
