use crate::models::{AlertFeature, ForecastPeriod};

/// Formats one alert feature into a fixed multi-line block.
///
/// Every field falls back independently to literal text when absent; the
/// output is byte-stable for a given input.
pub fn format_alert(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    format!(
        "Event: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}",
        props.event.as_deref().unwrap_or("Unknown"),
        props.area_desc.as_deref().unwrap_or("Unknown"),
        props.severity.as_deref().unwrap_or("Unknown"),
        props
            .description
            .as_deref()
            .unwrap_or("No description available"),
        props
            .instruction
            .as_deref()
            .unwrap_or("No specific instructions provided"),
    )
}

/// Formats one forecast period into a fixed multi-line block. All fields are
/// required; there is no defaulting here.
pub fn format_forecast_period(period: &ForecastPeriod) -> String {
    format!(
        "{}:\nTemperature: {}\u{00b0}{}\nWind: {} {}\nForecast: {}",
        period.name,
        period.temperature,
        period.temperature_unit,
        period.wind_speed,
        period.wind_direction,
        period.detailed_forecast,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertProperties;

    #[test]
    fn alert_with_no_properties_uses_every_fallback() {
        let feature = AlertFeature {
            properties: AlertProperties::default(),
        };

        assert_eq!(
            format_alert(&feature),
            "Event: Unknown\n\
             Area: Unknown\n\
             Severity: Unknown\n\
             Description: No description available\n\
             Instructions: No specific instructions provided"
        );
    }

    #[test]
    fn alert_fields_default_independently() {
        let feature = AlertFeature {
            properties: AlertProperties {
                event: Some("Flood Warning".into()),
                severity: Some("Severe".into()),
                ..AlertProperties::default()
            },
        };

        let formatted = format_alert(&feature);
        assert!(formatted.starts_with("Event: Flood Warning\nArea: Unknown\n"));
        assert!(formatted.contains("Severity: Severe\n"));
        assert!(formatted.ends_with("Instructions: No specific instructions provided"));
    }

    #[test]
    fn forecast_period_renders_fixed_template() {
        let period = ForecastPeriod {
            name: "Tonight".into(),
            temperature: 61,
            temperature_unit: "F".into(),
            wind_speed: "8 mph".into(),
            wind_direction: "SW".into(),
            detailed_forecast: "Partly cloudy.".into(),
        };

        assert_eq!(
            format_forecast_period(&period),
            "Tonight:\nTemperature: 61\u{00b0}F\nWind: 8 mph SW\nForecast: Partly cloudy."
        );
    }
}
