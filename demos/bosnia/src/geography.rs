//! Embedded geography and scenario for the demo.
//!
//! Eight municipalities with rough bounding boxes.  Two features carry no
//! `bbox` member and get one derived from their polygon instead.

pub const MUNICIPALITIES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "bbox": [18.38, 43.84, 18.45, 43.89],
      "properties": { "id_3": "BIH.1.1.1_1", "name_0": "Bosnia and Herzegovina",
                      "name_1": "Federacija Bosne i Hercegovine", "name_2": "Sarajevo", "name_3": "Centar Sarajevo" },
      "geometry": null },
    { "type": "Feature", "bbox": [17.80, 44.10, 18.05, 44.30],
      "properties": { "id_3": "BIH.1.2.1_1", "name_0": "Bosnia and Herzegovina",
                      "name_1": "Federacija Bosne i Hercegovine", "name_2": "Zenica-Doboj", "name_3": "Zenica" },
      "geometry": null },
    { "type": "Feature", "bbox": [18.55, 44.45, 18.80, 44.62],
      "properties": { "id_3": "BIH.1.3.1_1", "name_0": "Bosnia and Herzegovina",
                      "name_1": "Federacija Bosne i Hercegovine", "name_2": "Tuzla", "name_3": "Tuzla" },
      "geometry": null },
    { "type": "Feature",
      "properties": { "id_3": "BIH.1.4.1_1", "name_0": "Bosnia and Herzegovina",
                      "name_1": "Federacija Bosne i Hercegovine", "name_2": "Herzegovina-Neretva", "name_3": "Mostar" },
      "geometry": { "type": "Polygon",
                    "coordinates": [[[17.70, 43.20], [17.95, 43.20], [17.95, 43.45], [17.70, 43.45], [17.70, 43.20]]] } },
    { "type": "Feature", "bbox": [17.05, 44.65, 17.35, 44.90],
      "properties": { "id_3": "BIH.2.1.1_1", "name_0": "Bosnia and Herzegovina",
                      "name_1": "Republika Srpska", "name_2": "Banja Luka", "name_3": "Banja Luka" },
      "geometry": null },
    { "type": "Feature", "bbox": [15.75, 44.70, 16.05, 44.95],
      "properties": { "id_3": "BIH.1.5.1_1", "name_0": "Bosnia and Herzegovina",
                      "name_1": "Federacija Bosne i Hercegovine", "name_2": "Una-Sana", "name_3": "Bihać" },
      "geometry": null },
    { "type": "Feature",
      "properties": { "id_3": "BIH.2.2.1_1", "name_0": "Bosnia and Herzegovina",
                      "name_1": "Republika Srpska", "name_2": "Trebinje", "name_3": "Trebinje" },
      "geometry": { "type": "MultiPolygon",
                    "coordinates": [[[[18.25, 42.55], [18.60, 42.55], [18.60, 42.85], [18.25, 42.85], [18.25, 42.55]]]] } },
    { "type": "Feature", "bbox": [18.65, 44.80, 19.05, 45.00],
      "properties": { "id_3": "BIH.3.1.1_1", "name_0": "Bosnia and Herzegovina",
                      "name_1": "Brčko", "name_2": "Brčko", "name_3": "Brčko" },
      "geometry": null }
  ]
}"#;

pub const SCENARIO: &str = r#"{
  "sim": { "tick_interval_ms": 20, "total_ticks": 120, "seed": 2020, "snapshot_interval_ticks": 30 },
  "disease": { "name": "COVID-19", "transmission_probability": 0.35, "lethality": 0.05,
               "incubation_ticks": 10, "required_vaccine_doses": 2 },
  "starting_region": "BIH.1.1.1_1",
  "interventions": {
    "BIH.1.4.1_1": { "distancing": true, "masks": true },
    "BIH.2.1.1_1": { "lockdown": true },
    "BIH.1.3.1_1": { "vaccines_available": true }
  },
  "edits": { "BIH.1.1.1_1": { "population": 8000 } }
}"#;
