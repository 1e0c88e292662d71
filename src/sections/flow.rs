use super::TypedFields;
use crate::codec::non_empty;
use crate::enums::{FLOW_TYPE, TUBING_MATERIAL_TYPE};
use crate::form::{MetricFields, SectionForm, SectionIds, SectionTree, TextField};
use crate::metric_fields;
use crate::record::{FlowConditions, FlowType, Length, Tubing};

#[derive(Debug, Clone, PartialEq)]
pub struct FlowForm {
    pub flow_type: TypedFields,
    pub pump: TextField,
    pub tubing: TypedFields,
    pub diameter: MetricFields,
}

impl Default for FlowForm {
    fn default() -> Self {
        Self {
            flow_type: TypedFields::new(&FLOW_TYPE, "flow_details"),
            pump: TextField::free("flow_pump"),
            tubing: TypedFields::new(&TUBING_MATERIAL_TYPE, "flow_tubing_details"),
            diameter: metric_fields!(Length, "flow_tubing"),
        }
    }
}

impl SectionForm for FlowForm {
    type Record = FlowConditions;

    fn load(&mut self, record: &FlowConditions, _ids: &mut SectionIds) {
        if let Some(flow_type) = &record.flow_type {
            self.flow_type.write(flow_type.kind, &flow_type.details);
        }
        self.pump.set_text(record.pump_type.as_str());
        if let Some(tubing) = &record.tubing {
            self.tubing.write(tubing.kind, &tubing.details);
            self.diameter.write(tubing.diameter.as_ref());
        }
    }

    fn unload(&self) -> FlowConditions {
        FlowConditions {
            flow_type: non_empty(FlowType {
                kind: self.flow_type.kind(),
                details: self.flow_type.details(),
            }),
            pump_type: self.pump.text().to_string(),
            tubing: non_empty(Tubing {
                kind: self.tubing.kind(),
                details: self.tubing.details(),
                diameter: non_empty(self.diameter.read::<Length>()),
            }),
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.diameter.collect_invalid(out);
    }
}

impl SectionTree for FlowForm {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tubing_with_only_a_diameter_is_kept() {
        let mut form = FlowForm::default();
        form.diameter.value.set_text("0.8");
        let flow = form.unload();
        let tubing = flow.tubing.expect("tubing");
        assert_eq!(tubing.kind, 0);
        assert_eq!(tubing.diameter.and_then(|d| d.value), Some(0.8));
        assert_eq!(flow.flow_type, None);
    }

    #[test]
    fn loads_pump_and_type() {
        let record = FlowConditions {
            flow_type: Some(FlowType {
                kind: 2,
                details: String::new(),
            }),
            pump_type: "syringe".into(),
            tubing: None,
        };
        let mut form = FlowForm::default();
        form.load(&record, &mut SectionIds::default());
        assert_eq!(form.flow_type.kind.text(), "PLUG_FLOW_REACTOR");
        assert_eq!(form.unload(), record);
    }
}
