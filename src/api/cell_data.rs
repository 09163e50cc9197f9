use crate::normalize::error::NormalizeError;
use crate::query::geoserver::FeatureSource;
use crate::resolver::identifier::Identifier;
use crate::resolver::layers::Domain;
use crate::resolver::resolve::{resolve, ResolvedCell};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

/// Lifecycle of a result object.
///
/// Objects start out `Uninitialized`, are `Resolving` while requests are in
/// flight and end in `Valid` or `Invalid`. An update moves them through
/// `Resolving` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FetchState {
    Uninitialized,
    Resolving,
    Valid,
    Invalid,
}

/// The resolve, fetch and parse cycle shared by every result object.
///
/// The report is replaced as a whole on every update: either the new report
/// parsed completely or there is none.
pub(crate) struct CellData<S, R> {
    source: S,
    domain: Domain,
    cell: Option<ResolvedCell>,
    report: Option<R>,
    state: FetchState,
}

impl<S: FeatureSource, R> CellData<S, R> {
    /// Resolves `identifier` and, when a cell was found, runs the first update.
    pub(crate) async fn resolve(
        source: S,
        domain: Domain,
        identifier: Identifier,
        parse: impl Fn(&Value) -> Result<R, NormalizeError>,
    ) -> Self {
        let mut data = Self {
            source,
            domain,
            cell: None,
            report: None,
            state: FetchState::Uninitialized,
        };

        data.state = FetchState::Resolving;
        match resolve(&data.source, domain, &identifier).await {
            Ok(cell) => {
                data.cell = Some(cell);
                data.update(parse).await;
            }
            Err(e) => {
                warn!("Cannot resolve {} for {}: {}", identifier, domain, e);
                data.state = FetchState::Invalid;
            }
        }
        data
    }

    /// Replays the follow-up query of the resolved cell. Does nothing when no cell was resolved.
    pub(crate) async fn update(&mut self, parse: impl Fn(&Value) -> Result<R, NormalizeError>) {
        let Some(cell) = &self.cell else {
            return;
        };
        self.state = FetchState::Resolving;

        let parsed = match self.source.get_features(cell.follow_up()).await {
            Ok(collection) => parse(&collection).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match parsed {
            Ok(report) => {
                info!("Updated {} for cell {} '{}'", self.domain, cell.id(), cell.name());
                self.report = Some(report);
                self.state = FetchState::Valid;
            }
            Err(e) => {
                warn!(
                    "No valid {} data for cell {} '{}': {}",
                    self.domain,
                    cell.id(),
                    cell.name(),
                    e
                );
                self.report = None;
                self.state = FetchState::Invalid;
            }
        }
    }

    pub(crate) fn state(&self) -> FetchState {
        self.state
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.state == FetchState::Valid
    }

    /// The resolved cell, only while the data is valid.
    pub(crate) fn cell(&self) -> Option<&ResolvedCell> {
        self.cell.as_ref().filter(|_| self.is_valid())
    }

    /// The current report, only while the data is valid.
    pub(crate) fn report(&self) -> Option<&R> {
        self.report.as_ref().filter(|_| self.is_valid())
    }
}
