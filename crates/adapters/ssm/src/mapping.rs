//! Conversions between SDK shapes and domain types.

use std::collections::HashMap;

use aws_sdk_ssm::types::{
    DocumentParameter as SsmDocumentParameter, InstanceInformation, InstanceInformationFilter,
    InstanceInformationFilterKey,
};

use autorun_domain::parameters::{DocumentParameter, ParameterDefaults};
use autorun_domain::target::{TargetId, TargetInfo};

use crate::error::SsmError;

/// Filter restricting `DescribeInstanceInformation` to exactly one instance.
pub(crate) fn instance_filter(target: &TargetId) -> Result<InstanceInformationFilter, SsmError> {
    Ok(InstanceInformationFilter::builder()
        .key(InstanceInformationFilterKey::InstanceIds)
        .value_set(target.as_str())
        .build()?)
}

pub(crate) fn target_info(info: &InstanceInformation) -> TargetInfo {
    TargetInfo {
        instance_id: info.instance_id().unwrap_or_default().to_string(),
        ping_status: info.ping_status().map(|s| s.as_str().to_string()),
        platform_name: info.platform_name().map(str::to_string),
    }
}

pub(crate) fn document_parameter(param: &SsmDocumentParameter) -> DocumentParameter {
    DocumentParameter::new(param.name().unwrap_or_default(), param.default_value())
}

/// `SendCommand` takes every parameter as a list of strings.
pub(crate) fn command_parameters(defaults: &ParameterDefaults) -> HashMap<String, Vec<String>> {
    defaults
        .iter()
        .map(|(name, value)| (name.to_string(), vec![value.to_string()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ssm::types::PingStatus;

    #[test]
    fn should_scope_filter_to_single_instance() {
        let target = TargetId::resolve(Some("i-0abc")).unwrap();
        let filter = instance_filter(&target).unwrap();
        assert_eq!(filter.key(), &InstanceInformationFilterKey::InstanceIds);
        assert_eq!(filter.value_set(), &["i-0abc".to_string()]);
    }

    #[test]
    fn should_map_instance_information() {
        let info = InstanceInformation::builder()
            .instance_id("i-0abc")
            .ping_status(PingStatus::Online)
            .platform_name("Ubuntu")
            .build();
        let mapped = target_info(&info);
        assert_eq!(mapped.instance_id, "i-0abc");
        assert_eq!(mapped.ping_status.as_deref(), Some("Online"));
        assert_eq!(mapped.platform_name.as_deref(), Some("Ubuntu"));
    }

    #[test]
    fn should_map_declared_parameters_into_defaults() {
        let declared: Vec<DocumentParameter> = [
            SsmDocumentParameter::builder()
                .name("Foo")
                .default_value("")
                .build(),
            SsmDocumentParameter::builder()
                .name("Bar")
                .default_value("baz")
                .build(),
            SsmDocumentParameter::builder().name("Qux").build(),
        ]
        .iter()
        .map(document_parameter)
        .collect();

        let defaults = ParameterDefaults::from_declared(&declared);
        let params = command_parameters(&defaults);
        assert_eq!(params.len(), 1);
        assert_eq!(params["Bar"], vec!["baz".to_string()]);
    }

    #[test]
    fn should_produce_empty_parameters_for_empty_defaults() {
        assert!(command_parameters(&ParameterDefaults::default()).is_empty());
    }
}
