//! Admin inventory management
//!
//! Every operation re-checks the admin role server-side before any
//! other storage access; client-supplied role claims are never trusted.

use uuid::Uuid;
use validator::Validate;

use crate::clients::gemini_client::GeminiClient;
use crate::clients::storage_client::{parse_data_url, StorageClient};
use crate::dto::ai_dto::{AiScanRequest, AiScanResponse};
use crate::dto::car_dto::{
    AddCarRequest, AdminCarsParams, CarResponse, DeleteCarResponse, UpdateCarRequest,
};
use crate::middleware::auth::require_admin;
use crate::models::User;
use crate::repositories::car_repository::CarRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct AdminController {
    cars: CarRepository,
    http_client: reqwest::Client,
    gemini_api_key: Option<String>,
    storage_url: Option<String>,
    storage_service_key: Option<String>,
    storage_bucket: String,
}

impl AdminController {
    pub fn new(state: &AppState) -> Self {
        Self {
            cars: CarRepository::new(state.pool.clone()),
            http_client: state.http_client.clone(),
            gemini_api_key: state.config.gemini_api_key.clone(),
            storage_url: state.config.storage_url.clone(),
            storage_service_key: state.config.storage_service_key.clone(),
            storage_bucket: state.config.storage_bucket.clone(),
        }
    }

    fn storage_client(&self) -> Result<StorageClient, AppError> {
        match (&self.storage_url, &self.storage_service_key) {
            (Some(url), Some(key)) => Ok(StorageClient::new(
                self.http_client.clone(),
                url.clone(),
                key.clone(),
                self.storage_bucket.clone(),
            )),
            _ => Err(AppError::ExternalService(
                "Object storage is not configured".to_string(),
            )),
        }
    }

    fn gemini_client(&self) -> Result<GeminiClient, AppError> {
        self.gemini_api_key
            .clone()
            .map(|key| GeminiClient::new(self.http_client.clone(), key))
            .ok_or_else(|| AppError::ExternalService("AI service is not configured".to_string()))
    }

    /// Admin inventory list: all statuses, free text across
    /// make/model/color/year.
    pub async fn list_cars(
        &self,
        admin: &User,
        params: AdminCarsParams,
    ) -> Result<Vec<CarResponse>, AppError> {
        require_admin(admin)?;
        let cars = self.cars.admin_search(params.search.as_deref()).await?;
        Ok(cars.iter().map(|c| CarResponse::from_car(c, false)).collect())
    }

    /// Create a listing: validate the payload, upload its images to the
    /// object store under `cars/{id}/`, then insert the row with the
    /// public URLs.
    pub async fn add_car(
        &self,
        admin: &User,
        request: AddCarRequest,
    ) -> Result<CarResponse, AppError> {
        require_admin(admin)?;
        request.validate()?;

        let car_id = Uuid::new_v4();

        let image_urls = if request.images.is_empty() {
            Vec::new()
        } else {
            self.storage_client()?
                .upload_car_images(car_id, &request.images)
                .await?
        };

        let car = self.cars.create(&request, car_id, image_urls).await?;
        tracing::info!("Admin {} added car {} ({} {})", admin.id, car.id, car.make, car.model);

        Ok(CarResponse::from_car(&car, false))
    }

    pub async fn update_car(
        &self,
        admin: &User,
        car_id: Uuid,
        request: UpdateCarRequest,
    ) -> Result<CarResponse, AppError> {
        require_admin(admin)?;
        let car = self
            .cars
            .update_status(car_id, request.status, request.featured)
            .await?;
        Ok(CarResponse::from_car(&car, false))
    }

    /// Delete a listing. The row (and its cascading relations) is the
    /// primary action; image-store cleanup is best-effort and reported
    /// as a warning when it fails, never masking the deletion.
    pub async fn delete_car(
        &self,
        admin: &User,
        car_id: Uuid,
    ) -> Result<DeleteCarResponse, AppError> {
        require_admin(admin)?;

        if !self.cars.delete(car_id).await? {
            return Err(AppError::NotFound("Car not found".to_string()));
        }

        let warning = match self.storage_client() {
            Ok(storage) => match storage.delete_car_folder(car_id).await {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!("Image cleanup failed for car {}: {}", car_id, e);
                    Some(format!("Car deleted, but image cleanup failed: {}", e))
                }
            },
            Err(_) => Some("Car deleted, but object storage is not configured for cleanup".to_string()),
        };

        Ok(DeleteCarResponse {
            deleted: true,
            warning,
        })
    }

    /// Run the image-recognition AI over an uploaded photo. The result
    /// is a suggestion for the admin form, never written to storage.
    pub async fn scan_car_image(
        &self,
        admin: &User,
        request: AiScanRequest,
    ) -> Result<AiScanResponse, AppError> {
        require_admin(admin)?;

        let payload = parse_data_url(&request.image).ok_or_else(|| {
            AppError::BadRequest("image must be a base64 data URL".to_string())
        })?;

        use base64::engine::general_purpose::STANDARD as BASE64;
        use base64::Engine;

        let data = self
            .gemini_client()?
            .extract_car_details(&BASE64.encode(&payload.bytes), &payload.mime_type())
            .await?;

        Ok(AiScanResponse { data })
    }
}
