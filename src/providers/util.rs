use anyhow::{Error, anyhow};
use reqwest::Response;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Sends a request, retrying on transport errors and 5xx responses.
///
/// `retries` is the number of attempts after the first one. Client errors
/// (4xx) are returned immediately since repeating the request won't help.
pub async fn send_with_retry<F, Fut>(
    mut send: F,
    retries: usize,
    delay: Duration,
) -> Result<Response, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Response, reqwest::Error>>,
{
    let mut attempt = 1;
    loop {
        let err = match send().await {
            Ok(response) if response.status().is_server_error() => {
                anyhow!("Server responded with {}", response.status())
            }
            Ok(response) => return check_status(response),
            Err(e) => Error::from(e),
        };
        if attempt > retries {
            return Err(err);
        }
        debug!(
            "Attempt {}/{} failed: {}. Retrying...",
            attempt, retries, err
        );
        attempt += 1;
        tokio::time::sleep(delay).await;
    }
}

fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(anyhow!("Server responded with {status}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_retries_server_errors_then_succeeds() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/feed", mock_server.uri());
        let response = send_with_retry(|| client.get(&url).send(), 3, Duration::from_millis(1))
            .await
            .unwrap();

        assert_eq!(response.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_gives_up_after_retries() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let url = mock_server.uri();
        let result = send_with_retry(|| client.get(&url).send(), 2, Duration::from_millis(1)).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let url = mock_server.uri();
        let result = send_with_retry(|| client.get(&url).send(), 3, Duration::from_millis(1)).await;

        assert!(result.unwrap_err().to_string().contains("404"));
    }
}
