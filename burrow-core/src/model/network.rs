use log::debug;

use super::{AdjacencyList, BuildingFloor};
use crate::Error;
use crate::loading::{BuildingDirectory, Feature};
use crate::routing::{CostModel, Dijkstra, Preference, Route};

/// Navigation graph together with the entry points used to address it.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub adjacency: AdjacencyList,
    pub directory: BuildingDirectory,
    cost_model: CostModel,
}

impl Network {
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if the cost model fails [`CostModel::validate`].
    pub fn new(
        adjacency: AdjacencyList,
        directory: BuildingDirectory,
        cost_model: CostModel,
    ) -> Result<Self, Error> {
        cost_model.validate()?;
        Ok(Self {
            adjacency,
            directory,
            cost_model,
        })
    }

    /// Builds the graph and the directory from one feature list, with default speeds.
    pub fn from_features(features: &[Feature]) -> Self {
        Self {
            adjacency: AdjacencyList::build(features),
            directory: BuildingDirectory::from_features(features),
            cost_model: CostModel::default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if the cost model fails [`CostModel::validate`].
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Result<Self, Error> {
        cost_model.validate()?;
        self.cost_model = cost_model;
        Ok(self)
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    pub fn dijkstra(&self) -> Dijkstra<'_> {
        Dijkstra::with_validated_cost_model(&self.adjacency, self.cost_model)
    }

    /// Routes between two building/floor selections.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEntryPoint`] if either selection is not in the directory.
    /// An unreachable destination is `Ok(None)`.
    pub fn route(
        &self,
        start: &BuildingFloor,
        end: &BuildingFloor,
        preference: Preference,
    ) -> Result<Option<Route>, Error> {
        let from = self.directory.entry_point_of(start)?;
        let to = self.directory.entry_point_of(end)?;
        debug!("Routing {start} -> {end} by {preference}");
        Ok(self.dijkstra().route_with_preference(from, to, preference))
    }
}
