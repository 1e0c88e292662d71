//! The amount widget: a mass/moles/volume radio sharing one value and one
//! precision field, with a unit selector per kind.

use crate::codec::non_empty;
use crate::enums::{MASS_UNIT, MOLES_UNIT, VOLUME_UNIT};
use crate::form::{OptionalBoolSelector, SectionForm, SectionIds, Selector, TextField};
use crate::record::{Amount, Mass, Metric, Moles, Volume};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountKind {
    Mass,
    Moles,
    Volume,
}

impl AmountKind {
    pub const ALL: [AmountKind; 3] = [AmountKind::Mass, AmountKind::Moles, AmountKind::Volume];

    pub fn label(self) -> &'static str {
        match self {
            AmountKind::Mass => "mass",
            AmountKind::Moles => "moles",
            AmountKind::Volume => "volume",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmountForm {
    /// Radio selection. Nothing unloads until a kind is chosen.
    pub kind: Option<AmountKind>,
    pub value: TextField,
    pub precision: TextField,
    pub mass_units: Selector,
    pub moles_units: Selector,
    pub volume_units: Selector,
    /// Shown for volumes only.
    pub includes_solutes: OptionalBoolSelector,
}

impl Default for AmountForm {
    fn default() -> Self {
        Self {
            kind: None,
            value: TextField::float("amount_value"),
            precision: TextField::float("amount_precision"),
            mass_units: Selector::new(&MASS_UNIT),
            moles_units: Selector::new(&MOLES_UNIT),
            volume_units: Selector::new(&VOLUME_UNIT),
            includes_solutes: OptionalBoolSelector::default(),
        }
    }
}

impl AmountForm {
    /// Unit selector for the chosen kind.
    pub fn units(&self) -> Option<&Selector> {
        self.kind.map(|kind| match kind {
            AmountKind::Mass => &self.mass_units,
            AmountKind::Moles => &self.moles_units,
            AmountKind::Volume => &self.volume_units,
        })
    }

    pub fn units_mut(&mut self) -> Option<&mut Selector> {
        match self.kind? {
            AmountKind::Mass => Some(&mut self.mass_units),
            AmountKind::Moles => Some(&mut self.moles_units),
            AmountKind::Volume => Some(&mut self.volume_units),
        }
    }

    fn write_metric<M: Metric>(&mut self, kind: AmountKind, metric: &M) {
        self.kind = Some(kind);
        if let Some(value) = metric.value() {
            self.value.set_float(value);
        }
        if let Some(precision) = metric.precision() {
            self.precision.set_float(precision);
        }
        if let Some(units) = self.units_mut() {
            units.set(metric.units());
        }
    }

    fn read_metric<M: Metric>(&self, units: &Selector) -> Option<M> {
        let mut metric = M::default();
        if let Some(value) = self.value.as_float() {
            metric.set_value(value);
        }
        metric.set_units(units.get());
        if let Some(precision) = self.precision.as_float() {
            metric.set_precision(precision);
        }
        non_empty(metric)
    }
}

impl SectionForm for AmountForm {
    type Record = Amount;

    fn load(&mut self, amount: &Amount, _ids: &mut SectionIds) {
        if let Some(mass) = &amount.mass {
            self.write_metric(AmountKind::Mass, mass);
        } else if let Some(moles) = &amount.moles {
            self.write_metric(AmountKind::Moles, moles);
        } else if let Some(volume) = &amount.volume {
            self.write_metric(AmountKind::Volume, volume);
            self.includes_solutes.set(amount.volume_includes_solutes);
        }
    }

    fn unload(&self) -> Amount {
        let mut amount = Amount::default();
        match self.kind {
            Some(AmountKind::Mass) => amount.mass = self.read_metric::<Mass>(&self.mass_units),
            Some(AmountKind::Moles) => amount.moles = self.read_metric::<Moles>(&self.moles_units),
            Some(AmountKind::Volume) => {
                amount.volume = self.read_metric::<Volume>(&self.volume_units);
                if amount.volume.is_some() {
                    amount.volume_includes_solutes = self.includes_solutes.get();
                }
            }
            None => {}
        }
        amount
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.value.collect_invalid(out);
        self.precision.collect_invalid(out);
    }
}
