//! Travel planner: journeys broken into stages.

use serde::{Deserialize, Serialize};

use super::{DetailField, ListRow, TrackerEntry};
use crate::form::{FieldKind, FieldSpec, FormSchema, FormValues};

pub const PACES: &[&str] = &["Fast", "Normal", "Slow"];
pub const TRAVEL_TIME_UNITS: &[&str] = &["days", "hrs"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TravelStage {
    pub start: String,
    pub end: String,
    pub distance: String,
    pub terrain: String,
    pub weather: String,
    pub pace: String,
    pub travel_time: String,
    pub travel_time_unit: String,
    pub narrative: String,
    pub challenges: String,
    pub elapsed_time: String,
}

const STAGE_FORM: &[FieldSpec] = &[
    FieldSpec::new("start", "Start", FieldKind::Text),
    FieldSpec::new("end", "End", FieldKind::Text),
    FieldSpec::new("distance", "Distance", FieldKind::Text),
    FieldSpec::new("terrain", "Terrain", FieldKind::Text),
    FieldSpec::new("weather", "Weather", FieldKind::Text),
    FieldSpec::new("pace", "Pace", FieldKind::Select(PACES)),
    FieldSpec::new("travelTime", "Travel Time", FieldKind::Text),
    FieldSpec::new("travelTimeUnit", "Travel Time Unit", FieldKind::Select(TRAVEL_TIME_UNITS)),
    FieldSpec::new("narrative", "Narrative Notes", FieldKind::Multiline),
    FieldSpec::new("challenges", "Challenges", FieldKind::Multiline),
    FieldSpec::new("elapsedTime", "Elapsed Time", FieldKind::Text),
];

impl FormSchema for TravelStage {
    fn form_spec() -> &'static [FieldSpec] {
        STAGE_FORM
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        values.set_text("start", &self.start);
        values.set_text("end", &self.end);
        values.set_text("distance", &self.distance);
        values.set_text("terrain", &self.terrain);
        values.set_text("weather", &self.weather);
        values.set_text("pace", &self.pace);
        values.set_text("travelTime", &self.travel_time);
        values.set_text("travelTimeUnit", &self.travel_time_unit);
        values.set_text("narrative", &self.narrative);
        values.set_text("challenges", &self.challenges);
        values.set_text("elapsedTime", &self.elapsed_time);
        values
    }

    fn from_form(values: &FormValues) -> Self {
        Self {
            start: values.text("start").trim().to_string(),
            end: values.text("end").trim().to_string(),
            distance: values.text("distance").trim().to_string(),
            terrain: values.text("terrain").trim().to_string(),
            weather: values.text("weather").trim().to_string(),
            pace: values.text("pace").trim().to_string(),
            travel_time: values.text("travelTime").trim().to_string(),
            travel_time_unit: values.text("travelTimeUnit").trim().to_string(),
            narrative: values.text("narrative").trim().to_string(),
            challenges: values.text("challenges").trim().to_string(),
            elapsed_time: values.text("elapsedTime").trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TravelPlan {
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub stages: Vec<TravelStage>,
}

const FORM: &[FieldSpec] = &[
    FieldSpec::required("name", "Journey Name", FieldKind::Text),
    FieldSpec::new("origin", "Origin", FieldKind::Text),
    FieldSpec::new("destination", "Destination", FieldKind::Text),
    FieldSpec::new("stages", "Stages", FieldKind::Group(STAGE_FORM)),
];

impl FormSchema for TravelPlan {
    fn form_spec() -> &'static [FieldSpec] {
        FORM
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        values.set_text("name", &self.name);
        values.set_text("origin", &self.origin);
        values.set_text("destination", &self.destination);
        values.set_group("stages", self.stages.iter().map(FormSchema::to_form).collect());
        values
    }

    fn from_form(values: &FormValues) -> Self {
        Self {
            name: values.text("name").trim().to_string(),
            origin: values.text("origin").trim().to_string(),
            destination: values.text("destination").trim().to_string(),
            stages: values
                .group("stages")
                .iter()
                .map(TravelStage::from_form)
                .collect(),
        }
    }
}

impl TrackerEntry for TravelPlan {
    const SLOT: &'static str = "travelPlans";
    const TITLE: &'static str = "Travel Planner";
    const NOUN: &'static str = "Journey";

    fn title_of(&self) -> String {
        if self.name.is_empty() {
            "(No Name)".to_string()
        } else {
            self.name.clone()
        }
    }

    fn summary(&self) -> ListRow {
        ListRow {
            title: self.title_of(),
            tag: format!("{} -> {}", self.origin, self.destination),
            meta: format!("Stages: {}", self.stages.len()),
        }
    }

    fn detail(&self) -> Vec<DetailField> {
        let mut fields = vec![
            DetailField::plain("Journey Name", &self.name),
            DetailField::plain("Origin", &self.origin),
            DetailField::plain("Destination", &self.destination),
        ];
        for (i, stage) in self.stages.iter().enumerate() {
            let value = format!(
                "Start: {}\nEnd: {}\nDistance: {}\nTerrain: {}\nWeather: {}\nPace: {}\nTravel Time: {} {}\nNarrative Notes: {}\nChallenges: {}\nElapsed Time: {}",
                stage.start,
                stage.end,
                stage.distance,
                stage.terrain,
                stage.weather,
                stage.pace,
                stage.travel_time,
                stage.travel_time_unit,
                stage.narrative,
                stage.challenges,
                stage.elapsed_time,
            );
            fields.push(DetailField::plain(format!("Stage {}", i + 1), value));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_round_trip_through_form() {
        let plan = TravelPlan {
            name: "To Neverwinter".to_string(),
            origin: "Phandalin".to_string(),
            destination: "Neverwinter".to_string(),
            stages: vec![
                TravelStage {
                    start: "Phandalin".to_string(),
                    end: "Triboar Trail".to_string(),
                    pace: "Normal".to_string(),
                    travel_time: "2".to_string(),
                    travel_time_unit: "days".to_string(),
                    ..Default::default()
                },
                TravelStage {
                    start: "Triboar Trail".to_string(),
                    end: "Neverwinter".to_string(),
                    pace: "Slow".to_string(),
                    ..Default::default()
                },
            ],
        };

        let rebuilt = TravelPlan::from_form(&plan.to_form());
        assert_eq!(rebuilt, plan);
    }

    #[test]
    fn test_summary_counts_stages() {
        let plan = TravelPlan {
            name: "Coast Road".to_string(),
            stages: vec![TravelStage::default(); 3],
            ..Default::default()
        };
        assert_eq!(plan.summary().meta, "Stages: 3");
    }

    #[test]
    fn test_stage_wire_names() {
        let stage = TravelStage {
            travel_time: "3".to_string(),
            travel_time_unit: "hrs".to_string(),
            elapsed_time: "1 day".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&stage).unwrap();
        assert_eq!(value["travelTime"], "3");
        assert_eq!(value["travelTimeUnit"], "hrs");
        assert_eq!(value["elapsedTime"], "1 day");
    }
}
