//! VeloCloud Orchestrator (VCO) REST facade.
//!
//! Each operation is one POST against a fixed API path, scoped to the
//! configured enterprise, followed by extraction of the part of the reply
//! the caller asked for.
//!
//! ```rust,no_run
//! use netquery::{EdgeLookup, VcoClient};
//!
//! # async fn example() -> Result<(), netquery::Error> {
//! let vco = VcoClient::from_env()?;
//! if let EdgeLookup::Found(id) = vco.edge_id_by_name("NER0502D01").await? {
//!     println!("{}", vco.edge_management_ip(id).await?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
mod model;
pub mod stack;
mod transport;

pub use config::OrchestratorConfig;
pub use model::{
    Edge, EdgeLinkStatus, EdgeLookup, EdgeSerial, LanSvi, WanInterface, WanLinkState,
};
pub use transport::{HttpTransport, JsonTransport};

use std::collections::BTreeMap;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::{OrchestratorError, Result};

pub const ENTERPRISE_EDGES: &str = "/enterprise/getEnterpriseEdges";
pub const EDGE_CONFIGURATION_STACK: &str = "/edge/getEdgeConfigurationStack";
pub const ENTERPRISE_EDGE_LINK_STATUS: &str = "/monitoring/getEnterpriseEdgeLinkStatus";

/// Client for one enterprise on an orchestrator.
#[derive(Debug, Clone)]
pub struct VcoClient<T = HttpTransport> {
    transport: T,
    enterprise_id: i64,
}

impl VcoClient<HttpTransport> {
    pub fn new(config: OrchestratorConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config.enterprise_id))
    }

    /// Configure from `VCO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(OrchestratorConfig::from_env()?)
    }
}

impl<T: JsonTransport> VcoClient<T> {
    pub fn with_transport(transport: T, enterprise_id: i64) -> Self {
        Self {
            transport,
            enterprise_id,
        }
    }

    pub fn enterprise_id(&self) -> i64 {
        self.enterprise_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST `body` to `path`. An object body gets `enterpriseId` added unless
    /// it already has one.
    pub async fn request(&self, path: &str, mut body: Value) -> Result<Value> {
        if let Value::Object(fields) = &mut body {
            fields
                .entry("enterpriseId")
                .or_insert_with(|| json!(self.enterprise_id));
        }
        self.transport.post(path, &body).await
    }

    async fn request_as<R: DeserializeOwned>(&self, path: &str, body: Value) -> Result<R> {
        let value = self.request(path, body).await?;
        Ok(serde_json::from_value(value).map_err(OrchestratorError::Json)?)
    }

    /// Every edge in the enterprise.
    pub async fn edges(&self) -> Result<Vec<Edge>> {
        self.request_as(ENTERPRISE_EDGES, json!({})).await
    }

    async fn find_edge(&self, matches: impl Fn(&Edge) -> bool) -> Result<EdgeLookup<Edge>> {
        let mut edges = self.edges().await?;
        match edges.iter().position(matches) {
            Some(i) => Ok(EdgeLookup::Found(edges.swap_remove(i))),
            None => {
                debug!("no match among {} edges", edges.len());
                Ok(EdgeLookup::NotFound(edges))
            }
        }
    }

    /// The edge called `name`. An empty name never matches.
    pub async fn edge_by_name(&self, name: &str) -> Result<EdgeLookup<Edge>> {
        self.find_edge(|edge| !name.is_empty() && edge.name == name).await
    }

    pub async fn edge_id_by_name(&self, name: &str) -> Result<EdgeLookup<i64>> {
        Ok(self.edge_by_name(name).await?.map(|edge| edge.id))
    }

    pub async fn edge_by_id(&self, id: i64) -> Result<EdgeLookup<Edge>> {
        self.find_edge(|edge| edge.id == id).await
    }

    /// The full configuration stack of an edge.
    pub async fn edge_configuration(&self, edge_id: i64) -> Result<Value> {
        self.request(EDGE_CONFIGURATION_STACK, json!({ "edgeId": edge_id })).await
    }

    pub async fn edge_management_ip(&self, edge_id: i64) -> Result<String> {
        let config = self.edge_configuration(edge_id).await?;
        Ok(stack::management_ip(&config)?)
    }

    /// LAN SVIs keyed by VLAN id.
    pub async fn edge_lan_svi_info(&self, edge_id: i64) -> Result<BTreeMap<i64, LanSvi>> {
        let config = self.edge_configuration(edge_id).await?;
        Ok(stack::lan_svis(&config)?)
    }

    /// Routed interfaces keyed by name.
    pub async fn edge_wan_interface_info(
        &self,
        edge_id: i64,
    ) -> Result<BTreeMap<String, WanInterface>> {
        let config = self.edge_configuration(edge_id).await?;
        Ok(stack::wan_interfaces(&config)?)
    }

    /// Link status records, for every edge when `name` is `None` or empty.
    pub async fn edge_link_status(&self, name: Option<&str>) -> Result<Vec<EdgeLinkStatus>> {
        let records: Vec<EdgeLinkStatus> =
            self.request_as(ENTERPRISE_EDGE_LINK_STATUS, json!({})).await?;

        Ok(match name.filter(|n| !n.is_empty()) {
            Some(name) => records
                .into_iter()
                .filter(|record| record.edge_name == name)
                .collect(),
            None => records,
        })
    }

    /// Active and standby serial numbers, from the edge's first link record.
    pub async fn edge_serial_number(&self, name: &str) -> Result<EdgeSerial> {
        let records = if name.is_empty() {
            Vec::new()
        } else {
            self.edge_link_status(Some(name)).await?
        };

        let first = records
            .into_iter()
            .next()
            .ok_or_else(|| OrchestratorError::EdgeNotFound {
                name: name.to_string(),
            })?;

        Ok(EdgeSerial {
            edge_name: first.edge_name,
            active_serial: first.edge_serial_number,
            standby_serial: first.edge_ha_serial_number,
        })
    }

    /// WAN link state keyed by interface. Empty when the edge has no links.
    pub async fn wan_interface_status(&self, name: &str) -> Result<BTreeMap<String, WanLinkState>> {
        if name.is_empty() {
            return Ok(BTreeMap::new());
        }

        let records = self.edge_link_status(Some(name)).await?;
        let mut links = BTreeMap::new();
        for record in &records {
            match &record.interface {
                Some(interface) => {
                    links.insert(interface.clone(), WanLinkState::from(record));
                }
                None => debug!("{}: link record without interface skipped", name),
            }
        }
        Ok(links)
    }
}
