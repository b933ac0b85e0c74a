use crate::models::TourPackage;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub tour_packages: String,
}

/// Appwrite document store for the tour package catalog
///
/// Each package is one document; its places are embedded in the document.
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
    page_size: usize,
}

// Appwrite caps a single page at 100 documents
const LIST_PAGE_SIZE: usize = 100;

impl AppwriteClient {
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
            page_size: LIST_PAGE_SIZE,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.tour_packages
        )
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.documents_url(), urlencoding::encode(id))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
    }

    /// List every package in the catalog, one page at a time
    pub async fn list_packages(&self) -> Result<Vec<TourPackage>, AppwriteError> {
        let mut packages = Vec::new();
        let mut offset = 0usize;

        loop {
            let limit = format!("limit({})", self.page_size);
            let skip = format!("offset({})", offset);
            let url = format!(
                "{}?queries[]={}&queries[]={}",
                self.documents_url(),
                urlencoding::encode(&limit),
                urlencoding::encode(&skip)
            );

            let response = self.authorized(self.client.get(&url)).send().await?;
            let response = check_status(response, "list packages").await?;
            let json: Value = response.json().await?;

            let page_len = document_count(&json)?;
            let total = json.get("total").and_then(|t| t.as_u64());
            packages.extend(parse_document_list(&json)?);
            offset += page_len;

            let exhausted = total.map_or(false, |t| offset as u64 >= t);
            if page_len < self.page_size || exhausted {
                break;
            }
        }

        tracing::debug!("Listed {} packages", packages.len());
        Ok(packages)
    }

    /// Fetch one package by document id
    pub async fn get_package(&self, id: &str) -> Result<TourPackage, AppwriteError> {
        tracing::debug!("Fetching package: {}", id);

        let response = self.authorized(self.client.get(self.document_url(id))).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppwriteError::NotFound(format!("Package {} not found", id)));
        }
        let response = check_status(response, "fetch package").await?;

        let json: Value = response.json().await?;
        parse_document(&json)
    }

    /// Look up a package by its business id
    pub async fn find_by_package_id(&self, package_id: &str) -> Result<Option<TourPackage>, AppwriteError> {
        let query = format!("equal(\"packageId\", [\"{}\"])", package_id.replace('"', "\\\""));
        let url = format!("{}?queries[]={}", self.documents_url(), urlencoding::encode(&query));

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = check_status(response, "query packages").await?;

        let json: Value = response.json().await?;
        let found = parse_document_list(&json)?
            .into_iter()
            .find(|p| p.package_id == package_id);
        Ok(found)
    }

    /// Store a new package and return it as persisted
    pub async fn create_package(&self, package: &TourPackage) -> Result<TourPackage, AppwriteError> {
        let document_id = if package.id.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            package.id.clone()
        };

        let payload = json!({
            "documentId": document_id,
            "data": document_data(package)?,
        });

        let response = self
            .authorized(self.client.post(self.documents_url()))
            .json(&payload)
            .send()
            .await?;
        let response = check_status(response, "create package").await?;

        let json: Value = response.json().await?;
        let created = parse_document(&json)?;

        tracing::debug!("Created package {} ({})", created.id, created.package_id);
        Ok(created)
    }

    /// Replace the contents of an existing package
    pub async fn update_package(&self, id: &str, package: &TourPackage) -> Result<TourPackage, AppwriteError> {
        let payload = json!({ "data": document_data(package)? });

        let response = self
            .authorized(self.client.patch(self.document_url(id)))
            .json(&payload)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppwriteError::NotFound(format!("Package {} not found", id)));
        }
        let response = check_status(response, "update package").await?;

        let json: Value = response.json().await?;
        parse_document(&json)
    }

    pub async fn delete_package(&self, id: &str) -> Result<(), AppwriteError> {
        let response = self
            .authorized(self.client.delete(self.document_url(id)))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppwriteError::NotFound(format!("Package {} not found", id)));
        }
        check_status(response, "delete package").await?;

        tracing::debug!("Deleted package {}", id);
        Ok(())
    }
}

async fn check_status(response: Response, action: &str) -> Result<Response, AppwriteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(AppwriteError::Unauthorized);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read body".to_string());
    tracing::error!("Appwrite failed to {}: {} - {}", action, status, body);
    Err(AppwriteError::ApiError(format!("Failed to {}: {}", action, status)))
}

/// Package attributes without the fields Appwrite manages itself
fn document_data(package: &TourPackage) -> Result<Value, AppwriteError> {
    let mut data = serde_json::to_value(package)
        .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to encode package: {}", e)))?;

    if let Some(obj) = data.as_object_mut() {
        for managed in ["id", "createdAt", "updatedAt"] {
            obj.remove(managed);
        }
    }
    Ok(data)
}

fn parse_document(doc: &Value) -> Result<TourPackage, AppwriteError> {
    let data = doc.get("data").unwrap_or(doc);
    let mut package: TourPackage = serde_json::from_value(data.clone())
        .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse package: {}", e)))?;

    if package.id.is_empty() {
        if let Some(id) = doc.get("$id").and_then(|v| v.as_str()) {
            package.id = id.to_string();
        }
    }
    Ok(package)
}

fn documents(json: &Value) -> Result<&Vec<Value>, AppwriteError> {
    json.get("documents")
        .and_then(|d| d.as_array())
        .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))
}

/// Raw page length, unreadable documents included
fn document_count(json: &Value) -> Result<usize, AppwriteError> {
    documents(json).map(Vec::len)
}

fn parse_document_list(json: &Value) -> Result<Vec<TourPackage>, AppwriteError> {
    let documents = documents(json)?;

    // one broken document must not hide the rest of the catalog
    Ok(documents
        .iter()
        .filter_map(|doc| match parse_document(doc) {
            Ok(package) => Some(package),
            Err(e) => {
                tracing::warn!("Skipping unreadable package document: {}", e);
                None
            }
        })
        .collect())
}
