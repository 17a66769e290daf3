//! REST client for the habit backend.
//!
//! Routes:
//! - `GET    /api/habits?user_id=<id>`
//! - `POST   /api/habits`
//! - `PATCH  /api/habits/<id>`
//! - `DELETE /api/habits/<id>`
//!
//! Failures come back as `{"error": "<message>"}` with a non-2xx status.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::{RemoteError, RemoteStore};
use crate::habit::{Habit, HabitUpdate, NewHabitRecord};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: Client,
    base: Url,
}

impl HttpRemoteStore {
    /// Client rooted at `base_url`, e.g. `https://habits.example.com`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| RemoteError::Request(format!("invalid base url '{base_url}': {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.base
            .join(path)
            .map_err(|e| RemoteError::Request(format!("invalid endpoint '{path}': {e}")))
    }

    fn habit_endpoint(&self, id: &str) -> Result<Url, RemoteError> {
        let mut url = self.endpoint("api/habits")?;
        url.path_segments_mut()
            .map_err(|_| RemoteError::Request("base url cannot hold a path".to_string()))?
            .push(id);
        Ok(url)
    }

    /// Turn a non-success response into a [`RemoteError`].
    async fn check(response: Response, id: Option<&str>) -> Result<Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(RemoteError::NotFound(id.to_string()));
            }
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        Err(RemoteError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Habit>, RemoteError> {
        let response = self
            .client
            .get(self.endpoint("api/habits")?)
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        let response = Self::check(response, None).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, record: &NewHabitRecord) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.endpoint("api/habits")?)
            .json(record)
            .send()
            .await?;
        Self::check(response, None).await?;
        Ok(())
    }

    async fn update(&self, id: &str, update: &HabitUpdate) -> Result<(), RemoteError> {
        let response = self
            .client
            .patch(self.habit_endpoint(id)?)
            .json(update)
            .send()
            .await?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let response = self.client.delete(self.habit_endpoint(id)?).send().await?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::HabitDraft;
    use mockito::Matcher;

    fn store(server: &mockito::ServerGuard) -> HttpRemoteStore {
        HttpRemoteStore::new(&server.url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn list_sends_user_id_and_decodes_habits() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/habits")
            .match_query(Matcher::UrlEncoded("user_id".into(), "u-1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id":"h1","name":"Read","created":"2024-01-01T00:00:00Z",
                    "completedDates":["2024-01-02"]}]"#,
            )
            .create_async()
            .await;

        let habits = store(&server).list("u-1").await.unwrap();
        mock.assert_async().await;
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].id, "h1");
        assert_eq!(habits[0].completed_dates.len(), 1);
    }

    #[tokio::test]
    async fn create_posts_record_with_user_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/habits")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "name": "Stretch",
                "user_id": "u-1"
            })))
            .with_status(200)
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;

        let record = NewHabitRecord {
            draft: HabitDraft::new("Stretch"),
            user_id: "u-1".to_string(),
        };
        store(&server).create(&record).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_message_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/api/habits/h1")
            .with_status(500)
            .with_body(r#"{"error":"database unavailable"}"#)
            .create_async()
            .await;

        let err = store(&server)
            .update("h1", &HabitUpdate::default())
            .await
            .unwrap_err();
        match err {
            RemoteError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_404_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/habits/missing")
            .with_status(404)
            .create_async()
            .await;

        let err = store(&server).delete("missing").await.unwrap_err();
        assert!(matches!(err, RemoteError::NotFound(id) if id == "missing"));
    }

    #[test]
    fn base_url_with_prefix_keeps_prefix() {
        let store =
            HttpRemoteStore::new("http://localhost:3000/app", Duration::from_secs(1)).unwrap();
        assert_eq!(
            store.habit_endpoint("h 1").unwrap().as_str(),
            "http://localhost:3000/app/api/habits/h%201"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(HttpRemoteStore::new("not a url", Duration::from_secs(1)).is_err());
    }
}
