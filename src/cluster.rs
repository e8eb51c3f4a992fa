use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Secret};
use kube::api::{ApiResource, DeleteParams, DynamicObject, ListParams, ObjectMeta};
use kube::{Api, Client};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AppError;
use crate::models::{ImageTag, NamedResource, ResourceKind, TagEvent};

/// Builds an `ApiResource` for a group/version/kind the dynamic client
/// should talk to.
fn api_resource(group: &str, version: &str, kind: &str, plural: &str) -> ApiResource {
    let api_version = if group.is_empty() {
        version.to_string()
    } else {
        format!("{}/{}", group, version)
    };
    ApiResource {
        group: group.to_string(),
        version: version.to_string(),
        api_version,
        kind: kind.to_string(),
        plural: plural.to_string(),
    }
}

fn image_stream_resource() -> ApiResource {
    api_resource("image.openshift.io", "v1", "ImageStream", "imagestreams")
}

fn image_stream_tag_resource() -> ApiResource {
    api_resource("image.openshift.io", "v1", "ImageStreamTag", "imagestreamtags")
}

/// The workload kinds scanned for references to candidate resources.
pub fn workload_kinds() -> Vec<ApiResource> {
    vec![
        api_resource("", "v1", "Pod", "pods"),
        api_resource("apps", "v1", "StatefulSet", "statefulsets"),
        api_resource("apps", "v1", "Deployment", "deployments"),
        api_resource("apps", "v1", "DaemonSet", "daemonsets"),
        api_resource("apps", "v1", "ReplicaSet", "replicasets"),
        api_resource("apps.openshift.io", "v1", "DeploymentConfig", "deploymentconfigs"),
        api_resource("batch", "v1", "CronJob", "cronjobs"),
    ]
}

/// `<image>:<tag>`, the form in which workloads reference an image stream
/// tag.
pub fn build_tag_ref(image: &str, tag: &str) -> String {
    format!("{}:{}", image, tag)
}

/// Shape of `.status.tags` on an OpenShift ImageStream.
#[derive(Debug, Deserialize)]
struct NamedTagEventList {
    tag: String,
    #[serde(default)]
    items: Vec<TagEvent>,
}

fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(response) if response.code == 404)
}

fn to_named_resource(meta: &ObjectMeta, kind: ResourceKind) -> NamedResource {
    NamedResource {
        name: meta.name.clone().unwrap_or_default(),
        namespace: meta.namespace.clone(),
        kind,
        created: meta.creation_timestamp.as_ref().map(|t| t.0),
        labels: meta.labels.clone().unwrap_or_default(),
    }
}

/// Thin wrapper around the kube client exposing exactly the list/get/delete
/// calls the cleanup pipeline needs.
pub struct ClusterClient {
    client: Client,
}

impl ClusterClient {
    pub async fn new() -> Result<Self, AppError> {
        let client = Client::try_default().await?;
        Ok(Self { client })
    }

    /// The namespace the client configuration points at.
    pub fn default_namespace(&self) -> &str {
        self.client.default_namespace()
    }

    fn list_params(label_selector: Option<&str>) -> ListParams {
        match label_selector {
            Some(selector) => ListParams::default().labels(selector),
            None => ListParams::default(),
        }
    }

    /// Lists resources of the given kind, optionally narrowed by a label
    /// selector. Namespaces ignore the `namespace` argument.
    pub async fn list_resources(
        &self,
        kind: ResourceKind,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<NamedResource>, AppError> {
        debug!(%kind, namespace, ?label_selector, "Listing resources");
        let lp = Self::list_params(label_selector);

        let resources = match kind {
            ResourceKind::ConfigMap => {
                let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
                api.list(&lp)
                    .await?
                    .items
                    .iter()
                    .map(|cm| to_named_resource(&cm.metadata, kind))
                    .collect()
            }
            ResourceKind::Secret => {
                let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
                api.list(&lp)
                    .await?
                    .items
                    .iter()
                    .map(|s| to_named_resource(&s.metadata, kind))
                    .collect()
            }
            ResourceKind::Namespace => {
                let api: Api<Namespace> = Api::all(self.client.clone());
                api.list(&lp)
                    .await?
                    .items
                    .iter()
                    .map(|ns| to_named_resource(&ns.metadata, kind))
                    .collect()
            }
        };
        Ok(resources)
    }

    /// Deletes a single resource. A 404 counts as success: the resource is
    /// gone either way.
    pub async fn delete_resource(&self, resource: &NamedResource) -> Result<(), AppError> {
        let dp = DeleteParams::default();
        let result = match resource.kind {
            ResourceKind::ConfigMap => {
                let ns = resource.namespace.as_deref().unwrap_or_default();
                let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), ns);
                api.delete(&resource.name, &dp).await.map(|_| ())
            }
            ResourceKind::Secret => {
                let ns = resource.namespace.as_deref().unwrap_or_default();
                let api: Api<Secret> = Api::namespaced(self.client.clone(), ns);
                api.delete(&resource.name, &dp).await.map(|_| ())
            }
            ResourceKind::Namespace => {
                let api: Api<Namespace> = Api::all(self.client.clone());
                api.delete(&resource.name, &dp).await.map(|_| ())
            }
        };

        match result {
            Ok(()) => Ok(()),
            Err(err) if is_not_found(&err) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Fetches the tags of an image stream together with their push
    /// history.
    pub async fn image_stream_tags(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Vec<ImageTag>, AppError> {
        let resource = image_stream_resource();
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), namespace, &resource);

        let stream = match api.get(name).await {
            Ok(stream) => stream,
            Err(err) if is_not_found(&err) => {
                return Err(AppError::ImageStreamNotFound {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                })
            }
            Err(err) => return Err(err.into()),
        };

        let tags = match stream.data.pointer("/status/tags") {
            Some(tags) => {
                let lists: Vec<NamedTagEventList> = serde_json::from_value(tags.clone())?;
                lists
                    .into_iter()
                    .map(|list| ImageTag {
                        name: list.tag,
                        history: list.items,
                    })
                    .collect()
            }
            None => Vec::new(),
        };
        Ok(tags)
    }

    /// Deletes a single image stream tag. A 404 counts as success.
    pub async fn delete_image_stream_tag(
        &self,
        namespace: &str,
        image: &str,
        tag: &str,
    ) -> Result<(), AppError> {
        let resource = image_stream_tag_resource();
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), namespace, &resource);

        match api
            .delete(&build_tag_ref(image, tag), &DeleteParams::default())
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if is_not_found(&err) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Lists the live objects of one workload kind in a namespace as untyped
    /// JSON trees. Kinds the cluster does not serve (e.g. DeploymentConfig
    /// on plain Kubernetes) yield an empty list.
    pub async fn list_workload_objects(
        &self,
        namespace: &str,
        kind: &ApiResource,
    ) -> Result<Vec<Value>, AppError> {
        let api: Api<DynamicObject> = Api::namespaced_with(self.client.clone(), namespace, kind);
        self.list_dynamic(api, kind).await
    }

    /// Lists the live objects of one workload kind across all namespaces.
    pub async fn list_workload_objects_all(
        &self,
        kind: &ApiResource,
    ) -> Result<Vec<Value>, AppError> {
        let api: Api<DynamicObject> = Api::all_with(self.client.clone(), kind);
        self.list_dynamic(api, kind).await
    }

    async fn list_dynamic(
        &self,
        api: Api<DynamicObject>,
        kind: &ApiResource,
    ) -> Result<Vec<Value>, AppError> {
        let list = match api.list(&ListParams::default()).await {
            Ok(list) => list,
            Err(err) if is_not_found(&err) => {
                debug!(kind = %kind.kind, "Resource kind not served by this cluster");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut objects = Vec::with_capacity(list.items.len());
        for item in list.items {
            objects.push(serde_json::to_value(item)?);
        }
        Ok(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_kinds_cover_the_fixed_set() {
        let kinds = workload_kinds();
        let plurals: Vec<&str> = kinds.iter().map(|k| k.plural.as_str()).collect();
        assert_eq!(
            plurals,
            vec![
                "pods",
                "statefulsets",
                "deployments",
                "daemonsets",
                "replicasets",
                "deploymentconfigs",
                "cronjobs",
            ]
        );
    }

    #[test]
    fn test_api_resource_api_version_for_core_group() {
        let pods = api_resource("", "v1", "Pod", "pods");
        assert_eq!(pods.api_version, "v1");

        let deployments = api_resource("apps", "v1", "Deployment", "deployments");
        assert_eq!(deployments.api_version, "apps/v1");
    }

    #[test]
    fn test_build_tag_ref() {
        assert_eq!(build_tag_ref("myapp", "abc123"), "myapp:abc123");
    }

    #[test]
    fn test_named_tag_event_list_parses_image_stream_status() {
        let status = serde_json::json!([
            {
                "tag": "abc123",
                "items": [
                    { "created": "2020-01-01T00:00:00Z", "image": "sha256:aaa" },
                    { "created": "2021-06-01T00:00:00Z", "image": "sha256:bbb" }
                ]
            },
            { "tag": "empty" }
        ]);
        let lists: Vec<NamedTagEventList> = serde_json::from_value(status).unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].tag, "abc123");
        assert_eq!(lists[0].items.len(), 2);
        assert!(lists[1].items.is_empty());
    }
}
