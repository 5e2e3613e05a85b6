use log::{error, info};

use crate::{
    errors::RemoteError,
    media::{MediaSource, MediaType},
    request::{Header, Requester},
};

/// Input fields of the "add media source" form.
pub trait FormView {
    fn name(&self) -> String;
    fn url(&self) -> String;
    fn media_type(&self) -> String;
    /// Clears name and url. The media type selection is kept.
    fn clear_text_inputs(&mut self);
}

/// Registers the source described by the form with the server.
///
/// The inputs are cleared only once the server accepted the source.
pub async fn add_media_source<R: Requester, V: FormView>(
    requester: &R,
    view: &mut V,
) -> Result<MediaSource, RemoteError> {
    let result = submit(requester, view).await;
    match result {
        Ok(source) => {
            info!("added media source {} ({})", &source.name, &source.link);
            view.clear_text_inputs();
            Ok(source)
        }
        Err(e) => {
            error!("unable to add media source: {}", e);
            Err(e)
        }
    }
}

async fn submit<R: Requester, V: FormView>(
    requester: &R,
    view: &V,
) -> Result<MediaSource, RemoteError> {
    let media_type: MediaType = view.media_type().parse()?;
    let source = MediaSource::new(view.name(), view.url(), media_type)?;
    let raw = serde_json::to_string(&source)?;
    requester.put("/media", Some(raw), &[Header::json()]).await?;
    Ok(source)
}

#[cfg(test)]
mod tests {
    use awc::http::Method;

    use super::*;
    use crate::request::testing::FakeRequester;

    struct Fields {
        name: String,
        url: String,
        media_type: String,
    }

    impl FormView for Fields {
        fn name(&self) -> String {
            self.name.clone()
        }
        fn url(&self) -> String {
            self.url.clone()
        }
        fn media_type(&self) -> String {
            self.media_type.clone()
        }
        fn clear_text_inputs(&mut self) {
            self.name.clear();
            self.url.clear();
        }
    }

    fn fields(name: &str, url: &str, media_type: &str) -> Fields {
        Fields {
            name: name.into(),
            url: url.into(),
            media_type: media_type.into(),
        }
    }

    #[actix_web::test]
    async fn submits_json_and_clears_inputs() {
        let fake = FakeRequester::default();
        let mut view = fields("X", "http://a", "stream");

        add_media_source(&fake, &mut view).await.unwrap();

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::PUT);
        assert_eq!(calls[0].path, "/media");
        assert_eq!(
            calls[0].body.as_deref(),
            Some(r#"{"name":"X","link":"http://a","media_type":"stream","default_source":false}"#)
        );
        assert_eq!(calls[0].headers, vec![Header::json()]);
        assert!(view.name.is_empty());
        assert!(view.url.is_empty());
        assert_eq!(view.media_type, "stream");
    }

    #[actix_web::test]
    async fn failed_submit_keeps_inputs() {
        let fake = FakeRequester::default();
        fake.fail(Method::PUT, "/media", 500);
        let mut view = fields("X", "http://a", "radio");

        let err = add_media_source(&fake, &mut view).await.unwrap_err();

        assert!(matches!(err, RemoteError::Request(ref e) if e.status == 500));
        assert_eq!(view.name, "X");
        assert_eq!(view.url, "http://a");
    }

    #[actix_web::test]
    async fn invalid_fields_are_not_sent() {
        let fake = FakeRequester::default();

        let mut empty_name = fields("", "http://a", "stream");
        assert!(matches!(
            add_media_source(&fake, &mut empty_name).await,
            Err(RemoteError::InvalidMediaSource(_))
        ));

        let mut bad_type = fields("X", "http://a", "cassette");
        assert!(matches!(
            add_media_source(&fake, &mut bad_type).await,
            Err(RemoteError::UnknownMediaType(_))
        ));

        assert!(fake.calls().is_empty());
    }
}
