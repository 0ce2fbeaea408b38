//! Roster client
//!
//! [`Client`] is the public entry point. Every operation authenticates
//! lazily (one token exchange per client), then lists or posts through the
//! [`Connection`].
//!
//! ```rust,ignore
//! use clever_roster::{Client, ClientConfig};
//!
//! let config = ClientConfig::from_file("clever.yaml")?;
//! let mut client = Client::from_config(&config)?;
//! for classroom in client.classrooms(&[]).await? {
//!     println!("{} {:?}", classroom.uid, classroom.course_number);
//! }
//! ```

use crate::auth::{Authenticator, Credentials};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{Connection, Endpoint, EndpointTable, HttpConnection, Response};
use crate::pagination::Paginator;
use crate::records::{
    Classroom, Course, Enrollments, Record, RecordContext, Section, Student, Teacher,
    UsernameSource,
};
use crate::types::Method;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, field, info, info_span, Instrument, Span};

/// Client for the roster API
pub struct Client<C: Connection = HttpConnection> {
    connection: C,
    authenticator: Authenticator,
    endpoints: EndpointTable,
    paginator: Paginator,
    username_source: Option<UsernameSource>,
    shared_classes: bool,
    sync_id: Option<String>,
    span: Span,
}

impl Client<HttpConnection> {
    /// Build a client over HTTP from a validated config
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let credentials = config.credentials();
        let connection = HttpConnection::with_config(config.http.to_connection_config())?
            .with_auth(credentials.basic_auth());

        let mut client = Client::new(connection, credentials)
            .endpoints(config.endpoints())
            .username_source(config.username_source)
            .shared_classes(config.shared_classes);
        if let Some(sync_id) = &config.sync_id {
            client = client.sync_id(sync_id);
        }
        Ok(client)
    }
}

impl<C: Connection> Client<C> {
    /// Create an unauthenticated client over `connection`
    pub fn new(connection: C, credentials: Credentials) -> Self {
        let span = info_span!(
            "clever",
            app_id = %credentials.app_id,
            sync_id = field::Empty
        );
        Self {
            connection,
            authenticator: Authenticator::new(credentials),
            endpoints: EndpointTable::clever(),
            paginator: Paginator::new(),
            username_source: None,
            shared_classes: false,
            sync_id: None,
            span,
        }
    }

    /// Where student usernames come from
    pub fn username_source(mut self, source: Option<UsernameSource>) -> Self {
        self.username_source = source;
        self
    }

    /// Mark the district as using shared classes
    pub fn shared_classes(mut self, shared: bool) -> Self {
        self.shared_classes = shared;
        self
    }

    /// Tag log output with a sync run id
    pub fn sync_id(mut self, sync_id: impl Into<String>) -> Self {
        let sync_id = sync_id.into();
        self.span.record("sync_id", sync_id.as_str());
        self.sync_id = Some(sync_id);
        self
    }

    /// Override the endpoint table
    pub fn endpoints(mut self, endpoints: EndpointTable) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Whether a district token has been installed
    pub fn is_authenticated(&self) -> bool {
        self.authenticator.is_authenticated()
    }

    /// The district token, once authenticated
    pub fn app_token(&self) -> Option<&str> {
        self.authenticator.app_token()
    }

    /// Underlying connection
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Credentials in use
    pub fn credentials(&self) -> &Credentials {
        self.authenticator.credentials()
    }

    /// Shared-classes flag
    pub fn is_shared_classes(&self) -> bool {
        self.shared_classes
    }

    /// Sync run id, if set
    pub fn sync_run_id(&self) -> Option<&str> {
        self.sync_id.as_deref()
    }

    /// Endpoint table in use
    pub fn endpoint_table(&self) -> &EndpointTable {
        &self.endpoints
    }

    /// Exchange vendor credentials for the district token.
    ///
    /// Performed at most once; later calls return immediately.
    pub async fn authenticate(&mut self) -> Result<()> {
        let span = self.span.clone();
        self.ensure_authenticated().instrument(span).await
    }

    /// List students, optionally restricted to `uids`
    pub async fn students(&mut self, uids: &[String]) -> Result<Vec<Student>> {
        self.records(uids).await
    }

    /// List teachers, optionally restricted to `uids`
    pub async fn teachers(&mut self, uids: &[String]) -> Result<Vec<Teacher>> {
        self.records(uids).await
    }

    /// List courses, optionally restricted to `uids`
    pub async fn courses(&mut self, uids: &[String]) -> Result<Vec<Course>> {
        self.records(uids).await
    }

    /// List sections, optionally restricted to `uids`
    pub async fn sections(&mut self, uids: &[String]) -> Result<Vec<Section>> {
        self.records(uids).await
    }

    /// One classroom per section, with the course number of its course.
    ///
    /// The uid list is accepted for symmetry with the other listings and
    /// is not applied.
    pub async fn classrooms(&mut self, _uids: &[String]) -> Result<Vec<Classroom>> {
        let span = self.span.clone();
        async {
            self.ensure_authenticated().await?;
            let courses: Vec<Course> = self.list().await?;
            let sections: Vec<Section> = self.list().await?;

            let classrooms = Classroom::join(&sections, &courses);
            info!(count = classrooms.len(), "Built classrooms");
            Ok::<_, Error>(classrooms)
        }
        .instrument(span)
        .await
    }

    /// Student and teacher enrollments, optionally restricted to the
    /// sections in `classroom_uids`
    pub async fn enrollments(&mut self, classroom_uids: &[String]) -> Result<Enrollments> {
        let span = self.span.clone();
        async {
            self.ensure_authenticated().await?;
            let sections: Vec<Section> = self.list().await?;

            let enrollments = Enrollments::from_sections(&filter_by_uid(sections, classroom_uids));
            info!(
                students = enrollments.student.len(),
                teachers = enrollments.teacher.len(),
                "Built enrollments"
            );
            Ok::<_, Error>(enrollments)
        }
        .instrument(span)
        .await
    }

    /// Post a grade payload. The response comes back as-is, including
    /// non-success statuses.
    pub async fn send_grade(&mut self, body: &Value) -> Result<Response> {
        let span = self.span.clone();
        async {
            self.ensure_authenticated().await?;
            let url = self.endpoints.url(Endpoint::Grades);
            let response = self
                .connection
                .execute(url, Method::POST, None, Some(body))
                .await?;
            info!(status = response.status, "Sent grade");
            Ok::<_, Error>(response)
        }
        .instrument(span)
        .await
    }

    async fn records<T: Record>(&mut self, uids: &[String]) -> Result<Vec<T>> {
        let span = self.span.clone();
        async {
            self.ensure_authenticated().await?;
            let records = filter_by_uid(self.list::<T>().await?, uids);
            info!(
                endpoint = %T::ENDPOINT,
                count = records.len(),
                "Listed records"
            );
            Ok::<_, Error>(records)
        }
        .instrument(span)
        .await
    }

    async fn list<T: Record>(&self) -> Result<Vec<T>> {
        let url = self.endpoints.url(T::ENDPOINT);
        let ctx = RecordContext::with_username_source(self.username_source);
        self.paginator
            .fetch_all(&self.connection, url, Method::GET, ctx)
            .await
    }

    async fn ensure_authenticated(&mut self) -> Result<()> {
        let tokens_url = self.endpoints.url(Endpoint::Tokens);
        self.authenticator
            .authenticate(&mut self.connection, tokens_url)
            .await
    }
}

impl<C: Connection + std::fmt::Debug> std::fmt::Debug for Client<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("connection", &self.connection)
            .field("authenticator", &self.authenticator)
            .field("endpoints", &self.endpoints)
            .field("username_source", &self.username_source)
            .field("shared_classes", &self.shared_classes)
            .field("sync_id", &self.sync_id)
            .finish_non_exhaustive()
    }
}

/// Keep records whose uid is listed; an empty list keeps everything
fn filter_by_uid<T: Record>(records: Vec<T>, uids: &[String]) -> Vec<T> {
    if uids.is_empty() {
        return records;
    }
    let wanted: HashSet<&str> = uids.iter().map(String::as_str).collect();
    let before = records.len();
    let kept: Vec<T> = records
        .into_iter()
        .filter(|record| wanted.contains(record.uid()))
        .collect();
    debug!(before, after = kept.len(), "Filtered by uid");
    kept
}
