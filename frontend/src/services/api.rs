use gloo::net::http::Request;
use shared::CalendarMap;

/// Fallback when no `CALENDAR_API_URL` was provided at build time.
const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// API client for the remote calendar service.
///
/// The service exposes a single resource: the full date -> status map,
/// read with GET and overwritten with POST.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client pointed at the build-time configured base URL.
    pub fn new() -> Self {
        Self {
            base_url: option_env!("CALENDAR_API_URL")
                .unwrap_or(DEFAULT_BASE_URL)
                .to_string(),
        }
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// Fetch the full stored calendar.
    pub async fn get_calendar(&self) -> Result<CalendarMap, String> {
        let url = format!("{}/calendar", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<CalendarMap>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse calendar data: {}", e)),
                    }
                } else {
                    Err(format!("Server error {}", response.status()))
                }
            }
            Err(e) => Err(format!("Failed to fetch calendar data: {}", e)),
        }
    }

    /// Overwrite the stored calendar with `calendar`. Always the entire map,
    /// never a partial patch.
    pub async fn save_calendar(&self, calendar: &CalendarMap) -> Result<(), String> {
        let url = format!("{}/calendar", self.base_url);

        match Request::post(&url)
            .json(calendar)
            .map_err(|e| format!("Failed to serialize calendar: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(format!("Server error {}: {}", response.status(), error_text))
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
