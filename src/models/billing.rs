//! Consumption, catalogs, quotas, product types and reserved VM offers.

use serde::{Deserialize, Serialize};
use super::{is_default, is_false, is_zero, null_as_default, FiltersOldFormat, ResponseContext};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CatalogAttribute {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CatalogEntry {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub catalog_attributes: Vec<CatalogAttribute>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub entry_key: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub entry_value: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub short_description: String,
}

/// Cross-region catalog entry of a billable item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ItemCatalog {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub instance: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub source_region_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub target_region_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub version: String,
}

/// Price catalog of the provider's services.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Catalog {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub catalog_attributes: Vec<CatalogAttribute>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub catalog_entries: Vec<CatalogEntry>,
}

/// One consumption line for the requested period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ConsumptionEntries {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub consumption_value: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub entry: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub resource_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub service: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub short_description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Item {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub catalog: Vec<ItemCatalog>,
    /// Spelled as the service spells it.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub comsuption_value: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub entry: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub from_date: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub paying_account_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub service: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub subregion_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub to_date: String,
    #[serde(
        rename = "Type",
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub r#type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PricingDetail {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub count: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ProductType {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub product_type_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub vendor: String,
}

/// A quota and its current usage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Quota {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub max_value: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub quota_collection: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub short_description: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub used_value: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct QuotaTypes {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub quota_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub quotas: Vec<Quota>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RecurringCharge {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub frequency: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReservedVm {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub currency_code: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub offering_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub product_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub recurring_charges: Vec<RecurringCharge>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub reserved_vms_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub subregion_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub tenancy: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub vm_count: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub vm_type: String,
}

/// An offer for reserving VM capacity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReservedVmsOffer {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub currency_code: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub duration: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub fixed_price: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub offering_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub pricing_details: Vec<PricingDetail>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub product_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub recurring_charges: Vec<RecurringCharge>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub reserved_vms_offer_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub subregion_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub tenancy: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub usage_price: i64,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub vm_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PurchaseReservedVmsOfferRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub reserved_vms_offer_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub vm_count: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PurchaseReservedVmsOfferResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub reserved_vms_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadAccountConsumptionRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub from_date: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub to_date: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadAccountConsumptionResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub consumption_entries: ConsumptionEntries,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadBillableDigestRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub account_id: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub from_date: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub invoice_state: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub is_consolidated: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub to_date: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadBillableDigestResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadCatalogRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadCatalogResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub catalog: Catalog,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadProductTypesRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FiltersOldFormat>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadProductTypesResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub product_types: Vec<ProductType>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadPublicCatalogRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadPublicCatalogResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub catalog: Catalog,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadQuotasRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FiltersOldFormat>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub quota_names: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadQuotasResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub quota_types: Vec<QuotaTypes>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadReservedVmOffersRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FiltersOldFormat>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub offering_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub product_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub reserved_vms_offer_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub subregion_name: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub tenancy: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub vm_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadReservedVmOffersResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub reserved_vms_offers: Vec<ReservedVmsOffer>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadReservedVmsRequest {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FiltersOldFormat>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub offering_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub reserved_vms_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub subregion_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReadReservedVmsResponse {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub reserved_vms: Vec<ReservedVm>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "is_default")]
    pub response_context: ResponseContext,
}
