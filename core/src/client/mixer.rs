//! Weather mixer calls (`/mixer`): the merged per-day weather table the
//! controller computes from all enabled parsers.

use serde_json::Value;

use super::{parse_value, SprinklerClient};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

impl SprinklerClient {
    pub fn build_mixer(&self, start_date: Option<&str>, days: Option<u32>) -> HttpRequest {
        let mut path = "/mixer".to_string();
        if let Some(date) = start_date {
            path.push('/');
            path.push_str(date);
            if let Some(days) = days {
                path.push_str(&format!("/{days}"));
            }
        }
        self.get(&path)
    }

    pub fn parse_mixer(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_value(response)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::SprinklerClient;

    #[test]
    fn mixer_paths() {
        let client = SprinklerClient::new("http://host:8080");
        assert_eq!(client.build_mixer(None, None).url, "http://host:8080/api/4/mixer");
        assert_eq!(
            client.build_mixer(Some("2026-08-20"), None).url,
            "http://host:8080/api/4/mixer/2026-08-20"
        );
        assert_eq!(
            client.build_mixer(Some("2026-08-20"), Some(3)).url,
            "http://host:8080/api/4/mixer/2026-08-20/3"
        );
    }
}
