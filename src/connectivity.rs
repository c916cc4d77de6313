use itertools::Itertools;
use simple_error::{SimpleError, SimpleResult};

use crate::{
    types::HashMap,
    unit::{ElectricalProperties, ExcitableUnit, UnitId, UnitKind},
};

/// Which dendrite of the target a new connection attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DendriteSelection {
    /// spawn a new dendrite on the target
    Fresh,
    /// use the target's existing dendrite at this index
    Existing(usize),
    /// feed the target itself
    Direct,
}

/// Arena of all units of a network. Ownership edges (neuron to spawned dendrite)
/// and synaptic edges are both stored as unit ids.
#[derive(Debug, Default)]
pub struct Connectome {
    units: Vec<ExcitableUnit>,
    neuron_ids: Vec<UnitId>,
    input_ids: Vec<UnitId>,
    label_to_id: HashMap<String, UnitId>,
}

impl Connectome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_neuron(&mut self, electrical: ElectricalProperties) -> UnitId {
        let id = UnitId(self.units.len());
        let label = self.neuron_ids.len().to_string();
        self.push(ExcitableUnit::new_neuron(id, label, electrical));
        self.neuron_ids.push(id);
        id
    }

    pub fn add_input_neuron(&mut self, i0: f64) -> UnitId {
        let id = UnitId(self.units.len());
        let label = format!("Input.{}", self.input_ids.len());
        self.push(ExcitableUnit::new_input(id, label, i0));
        self.input_ids.push(id);
        id
    }

    fn push(&mut self, unit: ExcitableUnit) {
        self.label_to_id.insert(unit.label().to_string(), unit.id());
        self.units.push(unit);
    }

    pub fn unit(&self, id: UnitId) -> SimpleResult<&ExcitableUnit> {
        self.units
            .get(id.0)
            .ok_or_else(|| SimpleError::new(format!("Invalid unit id: {}", id.0)))
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> SimpleResult<&mut ExcitableUnit> {
        self.units
            .get_mut(id.0)
            .ok_or_else(|| SimpleError::new(format!("Invalid unit id: {}", id.0)))
    }

    pub fn unit_id(&self, label: &str) -> Option<UnitId> {
        self.label_to_id.get(label).copied()
    }

    pub fn units(&self) -> &[ExcitableUnit] {
        &self.units
    }

    pub fn neuron_ids(&self) -> &[UnitId] {
        &self.neuron_ids
    }

    pub fn input_ids(&self) -> &[UnitId] {
        &self.input_ids
    }

    pub fn num_units(&self) -> usize {
        self.units.len()
    }

    pub fn num_dendrites(&self, id: UnitId) -> SimpleResult<usize> {
        Ok(self.unit(id)?.num_dendrites())
    }

    /// Spawns a new dendrite owned by `owner` and returns its index in the
    /// owner's dendrite list.
    pub fn spawn_dendrite(&mut self, owner: UnitId) -> SimpleResult<usize> {
        let owner_unit = self.unit(owner)?;

        let electrical = match owner_unit.electrical() {
            Some(electrical) => *electrical,
            None => {
                return Err(SimpleError::new(format!(
                    "Cannot connect to input neuron {}",
                    owner_unit.label()
                )))
            }
        };

        let dendrite_index = owner_unit.num_dendrites();
        let label = format!("{}.{}", owner_unit.label(), dendrite_index);

        let id = UnitId(self.units.len());
        self.push(ExcitableUnit::new_dendrite(id, label, electrical, owner));
        self.unit_mut(owner)?.dendrites.push(id);

        Ok(dendrite_index)
    }

    /// Top level unit that owns `id`, following dendrite ownership upwards.
    pub fn root_of(&self, id: UnitId) -> SimpleResult<UnitId> {
        let mut current = id;
        while let Some(owner) = self.unit(current)?.owner() {
            current = owner;
        }
        Ok(current)
    }

    pub fn is_connected_to(&self, source: UnitId, target: UnitId) -> SimpleResult<bool> {
        let connected_to = self.unit(source)?.connected_to();
        let target_unit = self.unit(target)?;

        Ok(connected_to.contains(&target)
            || target_unit
                .dendrites()
                .iter()
                .any(|dendrite| connected_to.contains(dendrite)))
    }

    fn is_self_connection(&self, source: UnitId, target: UnitId) -> SimpleResult<bool> {
        Ok(self.root_of(source)? == self.root_of(target)?)
    }

    /// Makes `source` feed synaptic current into `target`. Connecting a unit to
    /// itself, to a unit sharing its owner, or to a target it already feeds is
    /// a no-op.
    pub fn connect(
        &mut self,
        source: UnitId,
        target: UnitId,
        selection: DendriteSelection,
    ) -> SimpleResult<()> {
        if self.is_self_connection(source, target)? || self.is_connected_to(source, target)? {
            return Ok(());
        }

        let target_unit = self.unit(target)?;

        if target_unit.kind() == UnitKind::Input {
            return Err(SimpleError::new(format!(
                "Cannot connect to input neuron {}",
                target_unit.label()
            )));
        }

        match selection {
            DendriteSelection::Direct => {
                self.unit_mut(target)?.dendrites.push(source);
                self.unit_mut(source)?.connected_to.push(target);
                Ok(())
            }
            DendriteSelection::Fresh => {
                let dendrite_index = self.spawn_dendrite(target)?;
                self.connect(source, target, DendriteSelection::Existing(dendrite_index))
            }
            DendriteSelection::Existing(dendrite_index) => {
                let num_dendrites = target_unit.num_dendrites();

                if dendrite_index >= num_dendrites {
                    return Err(SimpleError::new(format!(
                        "Invalid dendrite index: {}. Number of dendrites: {}",
                        dendrite_index, num_dendrites
                    )));
                }

                let dendrite = target_unit.dendrites()[dendrite_index];
                self.connect(source, dendrite, DendriteSelection::Direct)
            }
        }
    }

    /// All neurons plus everything feeding them, deduplicated, in arena order.
    pub fn reachable_units(&self) -> Vec<UnitId> {
        self.neuron_ids
            .iter()
            .copied()
            .chain(
                self.neuron_ids
                    .iter()
                    .flat_map(|id| self.units[id.0].dendrites().iter().copied()),
            )
            .unique()
            .sorted()
            .collect()
    }

    pub fn synaptic_input_current(&self, id: UnitId) -> SimpleResult<f64> {
        Ok(self
            .unit(id)?
            .dendrites()
            .iter()
            .map(|dendrite| self.units[dendrite.0].synaptic_output_current())
            .sum())
    }

    /// Every `connected_to` edge as (source, target).
    pub fn edges(&self) -> Vec<(UnitId, UnitId)> {
        self.units
            .iter()
            .flat_map(|unit| {
                unit.connected_to()
                    .iter()
                    .map(move |target| (unit.id(), *target))
            })
            .collect()
    }

    pub fn num_edges(&self) -> usize {
        self.units.iter().map(|unit| unit.connected_to().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::UnitParams;
    use itertools::assert_equal;

    fn connectome_with_neurons(num_neurons: usize) -> Connectome {
        let mut connectome = Connectome::new();
        for _ in 0..num_neurons {
            connectome.add_neuron(ElectricalProperties::from(&UnitParams::default()));
        }
        connectome
    }

    fn label(connectome: &Connectome, id: UnitId) -> &str {
        connectome.unit(id).unwrap().label()
    }

    #[test]
    fn sequential_neuron_labels() {
        let connectome = connectome_with_neurons(3);

        assert_equal(
            connectome
                .neuron_ids()
                .iter()
                .map(|id| label(&connectome, *id)),
            ["0", "1", "2"],
        );
        assert_eq!(connectome.unit_id("2"), Some(UnitId(2)));
        assert_eq!(connectome.unit_id("3"), None);
    }

    #[test]
    fn spawn_dendrite_labels_and_ownership() {
        let mut connectome = connectome_with_neurons(2);

        assert_eq!(connectome.spawn_dendrite(UnitId(1)).unwrap(), 0);
        assert_eq!(connectome.spawn_dendrite(UnitId(1)).unwrap(), 1);

        assert_eq!(connectome.num_dendrites(UnitId(1)).unwrap(), 2);
        let dendrite = connectome.unit_id("1.1").unwrap();
        assert_eq!(connectome.unit(dendrite).unwrap().kind(), UnitKind::Dendrite);
        assert_eq!(connectome.unit(dendrite).unwrap().owner(), Some(UnitId(1)));
        assert_eq!(connectome.root_of(dendrite).unwrap(), UnitId(1));
    }

    #[test]
    fn connect_fresh_attaches_to_new_dendrite() {
        let mut connectome = connectome_with_neurons(2);

        connectome
            .connect(UnitId(0), UnitId(1), DendriteSelection::Fresh)
            .unwrap();

        let dendrite = connectome.unit_id("1.0").unwrap();
        assert_equal(connectome.unit(UnitId(0)).unwrap().connected_to(), &[dendrite]);
        assert_equal(connectome.unit(dendrite).unwrap().dendrites(), &[UnitId(0)]);
        assert_equal(connectome.unit(UnitId(1)).unwrap().dendrites(), &[dendrite]);
        assert!(connectome.is_connected_to(UnitId(0), UnitId(1)).unwrap());
        assert!(!connectome.is_connected_to(UnitId(1), UnitId(0)).unwrap());
    }

    #[test]
    fn connect_existing_dendrite() {
        let mut connectome = connectome_with_neurons(3);

        connectome
            .connect(UnitId(0), UnitId(2), DendriteSelection::Fresh)
            .unwrap();
        connectome
            .connect(UnitId(1), UnitId(2), DendriteSelection::Existing(0))
            .unwrap();

        let dendrite = connectome.unit_id("2.0").unwrap();
        assert_eq!(connectome.num_dendrites(UnitId(2)).unwrap(), 1);
        assert_equal(
            connectome.unit(dendrite).unwrap().dendrites(),
            &[UnitId(0), UnitId(1)],
        );
    }

    #[test]
    fn connect_invalid_dendrite_index() {
        let mut connectome = connectome_with_neurons(2);

        let result = connectome.connect(UnitId(0), UnitId(1), DendriteSelection::Existing(0));

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().as_str(),
            "Invalid dendrite index: 0. Number of dendrites: 0"
        );
        assert_eq!(connectome.num_edges(), 0);
        assert_eq!(connectome.num_units(), 2);
    }

    #[test]
    fn connect_idempotent() {
        let mut connectome = connectome_with_neurons(2);

        connectome
            .connect(UnitId(0), UnitId(1), DendriteSelection::Fresh)
            .unwrap();
        connectome
            .connect(UnitId(0), UnitId(1), DendriteSelection::Fresh)
            .unwrap();
        connectome
            .connect(UnitId(0), UnitId(1), DendriteSelection::Existing(0))
            .unwrap();

        assert_eq!(connectome.num_dendrites(UnitId(1)).unwrap(), 1);
        assert_eq!(connectome.num_edges(), 1);
        assert_eq!(connectome.num_units(), 3);
    }

    #[test]
    fn self_connection_is_noop() {
        let mut connectome = connectome_with_neurons(1);

        connectome
            .connect(UnitId(0), UnitId(0), DendriteSelection::Fresh)
            .unwrap();
        assert_eq!(connectome.num_units(), 1);

        connectome.spawn_dendrite(UnitId(0)).unwrap();
        let dendrite = connectome.unit_id("0.0").unwrap();

        connectome
            .connect(UnitId(0), dendrite, DendriteSelection::Direct)
            .unwrap();
        connectome
            .connect(dendrite, UnitId(0), DendriteSelection::Fresh)
            .unwrap();

        assert_eq!(connectome.num_edges(), 0);
        assert_eq!(connectome.num_dendrites(UnitId(0)).unwrap(), 1);
    }

    #[test]
    fn cannot_connect_to_input_neuron() {
        let mut connectome = connectome_with_neurons(1);
        let input = connectome.add_input_neuron(1.0);

        let result = connectome.connect(UnitId(0), input, DendriteSelection::Fresh);

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().as_str(),
            "Cannot connect to input neuron Input.0"
        );
    }

    #[test]
    fn input_neuron_feeds_dendrite() {
        let mut connectome = connectome_with_neurons(1);
        let input = connectome.add_input_neuron(5.0);

        connectome
            .connect(input, UnitId(0), DendriteSelection::Fresh)
            .unwrap();

        let dendrite = connectome.unit_id("0.0").unwrap();
        assert_eq!(label(&connectome, input), "Input.0");
        assert_eq!(connectome.synaptic_input_current(dendrite).unwrap(), 5.0);
        assert_eq!(connectome.synaptic_input_current(UnitId(0)).unwrap(), 0.0);
    }

    #[test]
    fn unknown_unit_id() {
        let mut connectome = connectome_with_neurons(1);

        let result = connectome.connect(UnitId(0), UnitId(7), DendriteSelection::Fresh);

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().as_str(), "Invalid unit id: 7");
    }

    #[test]
    fn reachable_units_deduplicated() {
        let mut connectome = connectome_with_neurons(3);
        let input = connectome.add_input_neuron(1.0);

        connectome
            .connect(UnitId(0), UnitId(2), DendriteSelection::Fresh)
            .unwrap();
        connectome
            .connect(UnitId(1), UnitId(2), DendriteSelection::Fresh)
            .unwrap();
        connectome
            .connect(input, UnitId(1), DendriteSelection::Fresh)
            .unwrap();
        // a neuron feeding another neuron directly shows up as its dendrite
        connectome
            .connect(UnitId(0), UnitId(1), DendriteSelection::Direct)
            .unwrap();

        let reachable = connectome.reachable_units();

        assert_equal(
            reachable.iter().map(|id| label(&connectome, *id)),
            ["0", "1", "2", "2.0", "2.1", "1.0"],
        );
    }

    #[test]
    fn edges_by_source() {
        let mut connectome = connectome_with_neurons(3);

        connectome
            .connect(UnitId(0), UnitId(1), DendriteSelection::Fresh)
            .unwrap();
        connectome
            .connect(UnitId(0), UnitId(2), DendriteSelection::Fresh)
            .unwrap();
        connectome
            .connect(UnitId(1), UnitId(2), DendriteSelection::Existing(0))
            .unwrap();

        let edges: Vec<_> = connectome
            .edges()
            .into_iter()
            .map(|(from, to)| (label(&connectome, from), label(&connectome, to)))
            .collect();

        assert_eq!(edges, [("0", "1.0"), ("0", "2.0"), ("1", "2.0")]);
    }
}
