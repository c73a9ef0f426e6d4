use crate::models::vehicle::Vehicle;
use crate::services::error::ServiceError;
use crate::services::gateway::RequestGateway;
use crate::services::transport::HttpMethod;
use crate::utils::constants::VEHICLES_AVAILABLE_ENDPOINT;

#[derive(Clone)]
pub struct VehicleService {
    gateway: RequestGateway,
}

impl VehicleService {
    pub fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    /// Vehicles currently open for booking.
    pub async fn available(&self) -> Result<Vec<Vehicle>, ServiceError> {
        let envelope = self.gateway.send(VEHICLES_AVAILABLE_ENDPOINT, HttpMethod::Get).await;
        if !envelope.is_ok() {
            return Err(ServiceError::http(&envelope));
        }
        let vehicles: Vec<Vehicle> = envelope
            .data
            .decode()
            .map_err(|e| ServiceError::Decode(e.to_string()))?;
        log::info!("🚗 [VEHICLES] {} available", vehicles.len());
        Ok(vehicles)
    }
}
