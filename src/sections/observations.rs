use super::DataForm;
use crate::codec::non_empty;
use crate::form::{MetricFields, SectionForm, SectionId, SectionIds, SectionKey, SectionTree, TextField};
use crate::metric_fields;
use crate::record::{ReactionObservation, Time};

#[derive(Debug, Clone, PartialEq)]
pub struct ObservationForm {
    pub time: MetricFields,
    pub comment: TextField,
    pub image: DataForm,
}

impl Default for ObservationForm {
    fn default() -> Self {
        Self {
            time: metric_fields!(Time, "observation_time"),
            comment: TextField::free("observation_comment"),
            image: DataForm::default(),
        }
    }
}

impl SectionForm for ObservationForm {
    type Record = ReactionObservation;

    fn load(&mut self, observation: &ReactionObservation, ids: &mut SectionIds) {
        self.time.write(observation.time.as_ref());
        self.comment.set_text(observation.comment.as_str());
        if let Some(image) = &observation.image {
            self.image.load(image, ids);
        }
    }

    fn unload(&self) -> ReactionObservation {
        ReactionObservation {
            time: non_empty(self.time.read::<Time>()),
            comment: self.comment.text().to_string(),
            image: non_empty(self.image.unload()),
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.time.collect_invalid(out);
        self.image.collect_invalid(out);
    }
}

impl SectionTree for ObservationForm {
    fn scope(id: SectionId) -> Option<SectionKey> {
        Some(SectionKey::Observation(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Data;

    #[test]
    fn observation_with_image_url_round_trips() {
        let observation = ReactionObservation {
            time: Some(Time {
                value: Some(30.0),
                precision: None,
                units: 3,
            }),
            comment: "turned yellow".into(),
            image: Some(Data {
                url: Some("https://example.org/flask.jpg".into()),
                ..Default::default()
            }),
        };
        let mut form = ObservationForm::default();
        form.load(&observation, &mut SectionIds::default());
        assert_eq!(form.unload(), observation);
    }

    #[test]
    fn blank_observation_is_empty() {
        let form = ObservationForm::default();
        assert!(crate::codec::is_empty_message(&form.unload()));
    }
}
