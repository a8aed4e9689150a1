//! End-to-end resolution over a project model loaded from JSON.

use std::collections::BTreeMap;

use nativeplan_lib::capability::{CapabilityFacts, StaticVersion, detect};
use nativeplan_lib::plan::{Plan, PlanOptions, resolve};
use nativeplan_lib::project::{Project, ProjectProperties};
use nativeplan_lib::sbom::SbomOverride;
use nativeplan_lib::{ConfigError, Error};

const SPRING_STYLE_PROJECT: &str = r#"{
  "groupId": "com.example",
  "artifactId": "orders",
  "version": "2.1.0",
  "properties": {
    "start-class": "com.example.orders.OrdersApplication"
  },
  "buildSteps": [
    {
      "key": "org.apache.maven.plugins:maven-compiler-plugin",
      "configuration": {"release": "21"}
    },
    {
      "key": "org.apache.maven.plugins:maven-shade-plugin",
      "executions": [
        {"id": "relocate", "configuration": {"relocations": {"relocation": {"pattern": "com.google"}}}},
        {"id": "shade", "configuration": {"transformers": {"transformer": {"mainClass": "${start-class}"}}}}
      ]
    },
    {
      "key": "org.apache.maven.plugins:maven-jar-plugin",
      "configuration": {"archive": {"manifest": {"mainClass": "com.example.orders.Unused"}}}
    }
  ]
}"#;

const ORACLE_24_OUTPUT: &str = "native-image 24.0.1 2025-04-15
GraalVM Runtime Environment Oracle GraalVM 24.0.1+9.1 (build 24.0.1+9-jvmci-b01)";

const COMMUNITY_24_OUTPUT: &str = "native-image 24.0.1 2025-04-15
GraalVM Runtime Environment GraalVM CE 24.0.1+9.1 (build 24.0.1+9-jvmci-b01)";

fn project() -> Project {
  serde_json::from_str(SPRING_STYLE_PROJECT).unwrap()
}

fn facts(output: &str) -> CapabilityFacts {
  detect(&StaticVersion(output.to_string()))
}

#[test]
fn shade_transformer_with_property_is_used() {
  let project = project();
  let user = BTreeMap::new();
  let properties = ProjectProperties::new(&project, &user);

  let plan = resolve(&project, &PlanOptions::default(), &properties, &facts(ORACLE_24_OUTPUT)).unwrap();
  let outputs = plan.outputs().unwrap();

  assert_eq!(outputs.main_class.as_deref(), Some("com.example.orders.OrdersApplication"));
  assert!(outputs.arguments.is_empty());
  assert!(!outputs.sbom_generation_requested);
}

#[test]
fn user_property_overrides_project_property() {
  let project = project();
  let mut user = BTreeMap::new();
  user.insert("start-class".to_string(), "com.example.orders.Admin".to_string());
  let properties = ProjectProperties::new(&project, &user);

  let plan = resolve(&project, &PlanOptions::default(), &properties, &facts(ORACLE_24_OUTPUT)).unwrap();
  assert_eq!(
    plan.outputs().unwrap().main_class.as_deref(),
    Some("com.example.orders.Admin")
  );
}

#[test]
fn raw_sbom_flag_requests_generation_on_oracle() {
  let project = project();
  let user = BTreeMap::new();
  let properties = ProjectProperties::new(&project, &user);
  let options = PlanOptions {
    build_args: vec!["--enable-sbom=embed".to_string(), "-O3".to_string()],
    ..Default::default()
  };

  let plan = resolve(&project, &options, &properties, &facts(ORACLE_24_OUTPUT)).unwrap();
  let outputs = plan.outputs().unwrap();
  assert!(outputs.sbom_generation_requested);
  assert_eq!(outputs.arguments.as_slice(), &["--enable-sbom=embed", "-O3"]);
}

#[test]
fn raw_sbom_flag_is_tolerated_on_community() {
  let project = project();
  let user = BTreeMap::new();
  let properties = ProjectProperties::new(&project, &user);
  let options = PlanOptions {
    build_args: vec!["--enable-sbom".to_string()],
    ..Default::default()
  };

  let plan = resolve(&project, &options, &properties, &facts(COMMUNITY_24_OUTPUT)).unwrap();
  let outputs = plan.outputs().unwrap();
  assert!(!outputs.sbom_generation_requested);
  assert_eq!(outputs.arguments.as_slice(), &["--enable-sbom"]);
}

#[test]
fn explicit_sbom_on_unknown_toolchain_is_fatal() {
  let project = project();
  let user = BTreeMap::new();
  let properties = ProjectProperties::new(&project, &user);
  let options = PlanOptions {
    augmented_sbom: SbomOverride::Enabled,
    ..Default::default()
  };

  let err = resolve(&project, &options, &properties, &facts("garbage")).unwrap_err();
  assert!(matches!(err, Error::Config(ConfigError::UnsupportedEdition { .. })));
}

#[test]
fn pom_project_is_skipped_when_asked() {
  let mut project = project();
  project.packaging = "pom".to_string();
  let user = BTreeMap::new();
  let properties = ProjectProperties::new(&project, &user);
  let options = PlanOptions {
    skip_for_pom: true,
    augmented_sbom: SbomOverride::Enabled,
    ..Default::default()
  };

  let plan = resolve(&project, &options, &properties, &facts("garbage")).unwrap();
  assert!(matches!(plan, Plan::Skipped { .. }));
}

#[test]
fn mixed_configuration_shapes_load_and_resolve() {
  let json = r#"{
    "groupId": "com.example",
    "artifactId": "mixed",
    "buildSteps": [
      {"key": "org.apache.maven.plugins:maven-compiler-plugin", "configuration": {"release": 21, "fork": true}},
      {
        "key": "org.apache.maven.plugins:maven-shade-plugin",
        "executions": [
          {"id": "shade", "configuration": {"transformers": {"transformer": [
            {"mainClass": "com.example.mixed.Main"},
            {"resource": "META-INF/spring.factories"}
          ]}}}
        ]
      }
    ]
  }"#;
  let project: Project = serde_json::from_str(json).unwrap();
  let user = BTreeMap::new();
  let properties = ProjectProperties::new(&project, &user);

  let plan = resolve(&project, &PlanOptions::default(), &properties, &facts(ORACLE_24_OUTPUT)).unwrap();
  assert_eq!(
    plan.outputs().unwrap().main_class.as_deref(),
    Some("com.example.mixed.Main")
  );
}
