//! SOAP envelope composition.
//!
//! An envelope is three independent header fragments (authentication,
//! configuration, optional authorization) inside `soap:Header`, followed by
//! one operation payload inside `soap:Body`.

use quick_xml::escape::escape;

use crate::protocol::operation::API_NAMESPACE;
use crate::session::{Credentials, Session};

/// Builds request envelopes for one set of application credentials.
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    credentials: Credentials,
    max_result_age: u32,
}

impl EnvelopeBuilder {
    pub fn new(credentials: Credentials, max_result_age: u32) -> Self {
        Self {
            credentials,
            max_result_age,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Compose a full envelope around `payload`.
    ///
    /// The authorization block is emitted only when `include_authorization`
    /// is set and `session` is present; otherwise it is left out entirely.
    pub fn build(
        &self,
        payload: &str,
        include_authorization: bool,
        session: Option<&Session>,
    ) -> String {
        let authorization = match session {
            Some(session) if include_authorization => authorization_header(session),
            _ => String::new(),
        };

        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Header>
    {authentication}
    {configuration}
    {authorization}
  </soap:Header>
  <soap:Body>
    {payload}
  </soap:Body>
</soap:Envelope>
"#,
            authentication = self.authentication_header(),
            configuration = self.configuration_header(),
        )
    }

    fn authentication_header(&self) -> String {
        format!(
            r#"<AuthenticationHeader xmlns="{API_NAMESPACE}">
      <AppId>{}</AppId>
      <AppKey>{}</AppKey>
    </AuthenticationHeader>"#,
            escape(self.credentials.app_id()),
            escape(self.credentials.app_key()),
        )
    }

    fn configuration_header(&self) -> String {
        format!(
            r#"<ConfigurationHeader xmlns="{API_NAMESPACE}">
      <Sandbox>{}</Sandbox>
      <MaxResultAge>{}</MaxResultAge>
    </ConfigurationHeader>"#,
            u8::from(self.credentials.sandbox()),
            self.max_result_age,
        )
    }
}

fn authorization_header(session: &Session) -> String {
    format!(
        r#"<AuthorizationHeader xmlns="{API_NAMESPACE}">
      <UserId>{}</UserId>
      <Token>{}</Token>
    </AuthorizationHeader>"#,
        session.user_id, session.token,
    )
}
