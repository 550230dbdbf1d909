//! Machine images, image export tasks and the permission records shared with
//! snapshots.

use serde::{Deserialize, Serialize};
use super::{
    is_default, is_false, is_zero, null_as_default, BsuToCreate, ResourceTag, ResponseContext,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BlockDeviceMapping {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub bsu: Bsu,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub device_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub no_device: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub virtual_device_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BlockDeviceMappingImage {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub bsu: BsuToCreate,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub device_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub virtual_device_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Bsu {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_on_vm_deletion: Option<bool>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub iops: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub link_date: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub snapshot_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub volume_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub volume_size: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub volume_type: String,
}

/// An OMI (machine image).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Image {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub account_alias: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub architecture: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub block_device_mappings: Vec<BlockDeviceMappingImage>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub creation_date: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub file_location: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub image_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub image_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub image_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub permissions_to_launch: PermissionsOnResource,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub product_codes: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub root_device_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub root_device_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub state_comment: StateComment,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceTag>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ImageExportTask {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub image_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub osu_export: OsuExport,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub progress: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub task_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OsuApiKey {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub api_key_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub secret_key: String,
}

/// Destination bucket of an export task.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OsuExport {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub disk_image_format: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub osu_api_key: OsuApiKey,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub osu_bucket: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub osu_manifest_url: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub osu_prefix: String,
}

/// Accounts allowed to use an image or snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PermissionsOnResource {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub account_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub global_permission: bool,
}

/// Additions and removals applied to a `PermissionsOnResource`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PermissionsOnResourceCreation {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub additions: PermissionsOnResource,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub removals: PermissionsOnResource,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct StateComment {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state_code: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state_message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FiltersExportTask {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub task_ids: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FiltersImage {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub account_aliases: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub account_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub architectures: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub block_device_mapping_delete_on_vm_termination: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub block_device_mapping_device_names: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub block_device_mapping_snapshot_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub block_device_mapping_volume_size: Vec<i64>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub block_device_mapping_volume_type: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub hypervisors: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub image_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub image_names: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub image_types: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub kernel_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub manifest_location: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub permissions_to_launch_account_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub permissions_to_launch_global_permission: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub product_codes: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub ram_disk_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub root_device_names: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub root_device_types: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub system: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tag_keys: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tag_values: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub virtualization_types: Vec<String>,
}

/// Creates an image either from a VM (`VmId`), by copying another
/// image (`SourceImageId` and `SourceRegionName`), or by registering a
/// manifest (`FileLocation`) or a set of snapshots (`BlockDeviceMappings`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateImageRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub architecture: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub block_device_mappings: Vec<BlockDeviceMappingImage>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub file_location: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub image_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub no_reboot: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub root_device_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub source_image_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub source_region_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub vm_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateImageResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub image: Image,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateImageExportTaskRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub image_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub osu_export: OsuExport,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateImageExportTaskResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub image_export_task: ImageExportTask,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

/// Cancels an image or snapshot export task.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteExportTaskRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub export_task_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteExportTaskResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteImageRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub image_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DeleteImageResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadImageExportTasksRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub filters: FiltersExportTask,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadImageExportTasksResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub image_export_tasks: Vec<ImageExportTask>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadImagesRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub filters: FiltersImage,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadImagesResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateImageRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub image_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub permissions_to_launch: PermissionsOnResourceCreation,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UpdateImageResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub image: Image,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}
