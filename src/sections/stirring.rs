use super::TypedFields;
use crate::codec::non_empty;
use crate::enums::{STIRRING_METHOD_TYPE, STIRRING_RATE_TYPE};
use crate::form::{SectionForm, SectionIds, SectionTree, TextField};
use crate::record::{StirringConditions, StirringMethod, StirringRate};

/// Stirring conditions. Also embedded in workups.
#[derive(Debug, Clone, PartialEq)]
pub struct StirringForm {
    pub method: TypedFields,
    pub rate: TypedFields,
    pub rpm: TextField,
}

impl Default for StirringForm {
    fn default() -> Self {
        Self {
            method: TypedFields::new(&STIRRING_METHOD_TYPE, "stirring_method_details"),
            rate: TypedFields::new(&STIRRING_RATE_TYPE, "stirring_rate_details"),
            rpm: TextField::integer("stirring_rpm"),
        }
    }
}

impl SectionForm for StirringForm {
    type Record = StirringConditions;

    fn load(&mut self, record: &StirringConditions, _ids: &mut SectionIds) {
        if let Some(method) = &record.method {
            self.method.write(method.kind, &method.details);
        }
        if let Some(rate) = &record.rate {
            self.rate.write(rate.kind, &rate.details);
            // Zero is the unset value for rpm.
            if rate.rpm != 0 {
                self.rpm.set_integer(rate.rpm);
            }
        }
    }

    fn unload(&self) -> StirringConditions {
        StirringConditions {
            method: non_empty(StirringMethod {
                kind: self.method.kind(),
                details: self.method.details(),
            }),
            rate: non_empty(StirringRate {
                kind: self.rate.kind(),
                details: self.rate.details(),
                rpm: self.rpm.as_integer().unwrap_or_default(),
            }),
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.rpm.collect_invalid(out);
    }
}

impl SectionTree for StirringForm {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rpm_leaves_the_field_blank() {
        let record = StirringConditions {
            rate: Some(StirringRate {
                kind: 1,
                details: String::new(),
                rpm: 0,
            }),
            ..Default::default()
        };
        let mut form = StirringForm::default();
        form.load(&record, &mut SectionIds::default());
        assert_eq!(form.rpm.text(), "");
        assert_eq!(form.rate.kind.text(), "HIGH");
    }

    #[test]
    fn rpm_only_rate_is_kept() {
        let mut form = StirringForm::default();
        form.rpm.set_text("300");
        let stirring = form.unload();
        assert_eq!(stirring.method, None);
        assert_eq!(stirring.rate.map(|r| r.rpm), Some(300));
    }
}
