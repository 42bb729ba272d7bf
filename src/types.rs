use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Website,
    Newsletters,
    Print,
    Events,
    Podcasts,
    Radio,
    Streaming,
    Television,
    SocialMedia,
}

impl Channel {
    /// Tolerant tag parser. Host records carry channel names with casing and
    /// singular/plural drift, so matching happens on the trimmed lowercase
    /// tag and accepts the common variants. Unknown tags read as no channel
    /// context at all.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let t = tag.trim().to_ascii_lowercase();
        match t.as_str() {
            "website" | "websites" => Some(Channel::Website),
            "newsletter" | "newsletters" => Some(Channel::Newsletters),
            "print" => Some(Channel::Print),
            "event" | "events" => Some(Channel::Events),
            "podcast" | "podcasts" => Some(Channel::Podcasts),
            "radio" => Some(Channel::Radio),
            "streaming" => Some(Channel::Streaming),
            "television" | "tv" => Some(Channel::Television),
            "social_media" | "socialmedia" | "social media" | "social" => {
                Some(Channel::SocialMedia)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Channel::Website => "website",
            Channel::Newsletters => "newsletters",
            Channel::Print => "print",
            Channel::Events => "events",
            Channel::Podcasts => "podcasts",
            Channel::Radio => "radio",
            Channel::Streaming => "streaming",
            Channel::Television => "television",
            Channel::SocialMedia => "social_media",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Pricing models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    /// Single recurring fee. The one channel-sensitive label: events render
    /// it per occurrence, everything else per month.
    Flat,
    /// Legacy display-only tag. Renders as "Flat Rate" and never projects.
    FlatRate,
    Monthly,
    Weekly,
    PerWeek,
    PerDay,
    PerSpot,
    PerSend,
    PerEpisode,
    PerPost,
    PerStory,
    PerAd,
    PerLine,
    PerVideo,
    /// Cost per 1000 impressions.
    Cpm,
    /// Cost per click. Click volume is not tracked, so it never projects.
    Cpc,
    /// Cost per 1000 downloads.
    Cpd,
    /// Cost per 1000 views.
    Cpv,
    /// Negotiated pricing, no numeric amount.
    Contact,
}

impl PricingModel {
    /// Parses an explicit pricingModel tag. Trims and lowercases; anything
    /// outside the known set reads as no model.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let t = tag.trim().to_ascii_lowercase();
        let model = match t.as_str() {
            "flat" => PricingModel::Flat,
            "flat_rate" => PricingModel::FlatRate,
            "monthly" => PricingModel::Monthly,
            "weekly" => PricingModel::Weekly,
            "per_week" => PricingModel::PerWeek,
            "per_day" => PricingModel::PerDay,
            "per_spot" => PricingModel::PerSpot,
            "per_send" => PricingModel::PerSend,
            "per_episode" => PricingModel::PerEpisode,
            "per_post" => PricingModel::PerPost,
            "per_story" => PricingModel::PerStory,
            "per_ad" => PricingModel::PerAd,
            "per_line" => PricingModel::PerLine,
            "per_video" => PricingModel::PerVideo,
            "cpm" => PricingModel::Cpm,
            "cpc" => PricingModel::Cpc,
            "cpd" => PricingModel::Cpd,
            "cpv" => PricingModel::Cpv,
            "contact" => PricingModel::Contact,
            _ => return None,
        };
        Some(model)
    }

    /// Unit suffix for display. `channel` disambiguates exactly one case:
    /// a flat fee on an events channel is a sponsorship per occurrence, not
    /// a recurring monthly charge.
    pub fn unit_label(self, channel: Option<Channel>) -> &'static str {
        match self {
            PricingModel::Flat => match channel {
                Some(Channel::Events) => "/occurrence",
                _ => "/month",
            },
            PricingModel::FlatRate => "Flat Rate",
            PricingModel::Monthly => "/month",
            PricingModel::Weekly | PricingModel::PerWeek => "/week",
            PricingModel::PerDay => "/day",
            PricingModel::PerSpot => "/spot",
            PricingModel::PerSend => "/send",
            PricingModel::PerEpisode => "/episode",
            PricingModel::PerPost => "/post",
            PricingModel::PerStory => "/story",
            PricingModel::PerAd => "/ad",
            PricingModel::PerLine => "/line",
            PricingModel::PerVideo => "/video",
            PricingModel::Cpm => "/1000 impressions",
            PricingModel::Cpc => "/click",
            PricingModel::Cpd => "/1000 downloads",
            PricingModel::Cpv => "/1000 views",
            PricingModel::Contact => "Contact for pricing",
        }
    }
}

impl std::fmt::Display for PricingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PricingModel::Flat => "flat",
            PricingModel::FlatRate => "flat_rate",
            PricingModel::Monthly => "monthly",
            PricingModel::Weekly => "weekly",
            PricingModel::PerWeek => "per_week",
            PricingModel::PerDay => "per_day",
            PricingModel::PerSpot => "per_spot",
            PricingModel::PerSend => "per_send",
            PricingModel::PerEpisode => "per_episode",
            PricingModel::PerPost => "per_post",
            PricingModel::PerStory => "per_story",
            PricingModel::PerAd => "per_ad",
            PricingModel::PerLine => "per_line",
            PricingModel::PerVideo => "per_video",
            PricingModel::Cpm => "cpm",
            PricingModel::Cpc => "cpc",
            PricingModel::Cpd => "cpd",
            PricingModel::Cpv => "cpv",
            PricingModel::Contact => "contact",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Price fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    FlatRate,
    PerPost,
    PerStory,
    Monthly,
    PerSpot,
    Per30Second,
    Per60Second,
    PerSend,
    Cpm,
    Cpc,
    Weekly,
    PerEpisode,
    PerVideo,
    PerAd,
    PerLine,
    Cpd,
    Cpv,
    Daily,
}

impl PriceField {
    /// Resolution priority. Legacy records with several populated fields must
    /// always resolve the same field first, so this order never changes.
    pub const ALL: [PriceField; 18] = [
        PriceField::FlatRate,
        PriceField::PerPost,
        PriceField::PerStory,
        PriceField::Monthly,
        PriceField::PerSpot,
        PriceField::Per30Second,
        PriceField::Per60Second,
        PriceField::PerSend,
        PriceField::Cpm,
        PriceField::Cpc,
        PriceField::Weekly,
        PriceField::PerEpisode,
        PriceField::PerVideo,
        PriceField::PerAd,
        PriceField::PerLine,
        PriceField::Cpd,
        PriceField::Cpv,
        PriceField::Daily,
    ];

    /// Field-to-model lookup used when a record carries no explicit
    /// pricingModel tag. Note the non-obvious rows: timed radio/TV slots are
    /// spot pricing, the `weekly` amount field means per-week billing, and
    /// `daily` means per-day.
    pub fn model(self) -> PricingModel {
        match self {
            PriceField::FlatRate => PricingModel::Flat,
            PriceField::PerPost => PricingModel::PerPost,
            PriceField::PerStory => PricingModel::PerStory,
            PriceField::Monthly => PricingModel::Monthly,
            PriceField::PerSpot | PriceField::Per30Second | PriceField::Per60Second => {
                PricingModel::PerSpot
            }
            PriceField::PerSend => PricingModel::PerSend,
            PriceField::Cpm => PricingModel::Cpm,
            PriceField::Cpc => PricingModel::Cpc,
            PriceField::Weekly => PricingModel::PerWeek,
            PriceField::PerEpisode => PricingModel::PerEpisode,
            PriceField::PerVideo => PricingModel::PerVideo,
            PriceField::PerAd => PricingModel::PerAd,
            PriceField::PerLine => PricingModel::PerLine,
            PriceField::Cpd => PricingModel::Cpd,
            PriceField::Cpv => PricingModel::Cpv,
            PriceField::Daily => PricingModel::PerDay,
        }
    }
}

// ---------------------------------------------------------------------------
// Price records
// ---------------------------------------------------------------------------

/// One pricing record as stored on an advertising opportunity. Every field is
/// optional: canonical records populate one amount plus a pricingModel tag,
/// legacy records may populate several amounts and no tag at all.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub flat_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub per_post: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub per_story: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub monthly: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub per_spot: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub per_30_second: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub per_60_second: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub per_send: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub cpm: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub cpc: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub weekly: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub per_episode: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub per_video: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub per_ad: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub per_line: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub cpd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub cpv: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub daily: Option<f64>,
    #[serde(default, deserialize_with = "lenient_tag")]
    pub pricing_model: Option<String>,
    #[serde(default, deserialize_with = "lenient_tag")]
    pub minimum_commitment: Option<String>,
    #[serde(default, deserialize_with = "lenient_tag")]
    pub frequency: Option<String>,
}

impl PriceRecord {
    /// Total conversion from raw host JSON. Unknown keys are ignored; amounts
    /// accept numbers or numeric strings, and any other shape reads as
    /// absent.
    pub fn from_value(v: &Value) -> Self {
        serde_json::from_value(v.clone()).unwrap_or_default()
    }

    pub fn field_value(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::FlatRate => self.flat_rate,
            PriceField::PerPost => self.per_post,
            PriceField::PerStory => self.per_story,
            PriceField::Monthly => self.monthly,
            PriceField::PerSpot => self.per_spot,
            PriceField::Per30Second => self.per_30_second,
            PriceField::Per60Second => self.per_60_second,
            PriceField::PerSend => self.per_send,
            PriceField::Cpm => self.cpm,
            PriceField::Cpc => self.cpc,
            PriceField::Weekly => self.weekly,
            PriceField::PerEpisode => self.per_episode,
            PriceField::PerVideo => self.per_video,
            PriceField::PerAd => self.per_ad,
            PriceField::PerLine => self.per_line,
            PriceField::Cpd => self.cpd,
            PriceField::Cpv => self.cpv,
            PriceField::Daily => self.daily,
        }
    }
}

/// Amounts survive as numbers or numeric strings; any other shape reads as
/// absent rather than failing the whole record.
fn lenient_amount<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(v.and_then(|v| {
        v.as_f64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
    }))
}

fn lenient_tag<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(v.and_then(|v| v.as_str().map(|s| s.to_string())))
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// One entry in an ordered tier list (several commitment lengths for the same
/// opportunity). Order is display-significant and never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PricingTier {
    #[serde(default, deserialize_with = "lenient_record")]
    pub pricing: PriceRecord,
}

impl PricingTier {
    pub fn from_value(v: &Value) -> Self {
        serde_json::from_value(v.clone()).unwrap_or_default()
    }
}

fn lenient_record<'de, D>(de: D) -> Result<PriceRecord, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(v.as_ref().map(PriceRecord::from_value).unwrap_or_default())
}

/// Pricing attached to an opportunity: a single record, or an ordered list of
/// tiers.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingInput {
    Single(PriceRecord),
    Tiers(Vec<PricingTier>),
}

impl PricingInput {
    /// Total conversion from whatever the host stored under `pricing`.
    /// Arrays read as tier lists, objects as single records, anything else as
    /// an empty record that normalizes to a single N/A line.
    pub fn from_value(v: &Value) -> Self {
        match v {
            Value::Array(items) => {
                PricingInput::Tiers(items.iter().map(PricingTier::from_value).collect())
            }
            Value::Object(_) => PricingInput::Single(PriceRecord::from_value(v)),
            _ => PricingInput::Single(PriceRecord::default()),
        }
    }

    /// The record that stands for the whole input when a single resolution is
    /// needed (model inference, revenue projection). A tier list is
    /// represented by its first tier.
    pub fn representative(&self) -> Option<&PriceRecord> {
        match self {
            PricingInput::Single(record) => Some(record),
            PricingInput::Tiers(tiers) => tiers.first().map(|t| &t.pricing),
        }
    }
}

impl Default for PricingInput {
    fn default() -> Self {
        PricingInput::Single(PriceRecord::default())
    }
}

// ---------------------------------------------------------------------------
// Hub overrides
// ---------------------------------------------------------------------------

/// Price override negotiated with one distribution hub. `pricing` stays raw
/// JSON: the merger validates shape only and must hand valid entries back for
/// persistence unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubPriceOverride {
    pub hub_id: Option<String>,
    pub hub_name: Option<String>,
    pub pricing: Value,
}

impl HubPriceOverride {
    /// Total conversion: missing or mistyped fields read as absent and fail
    /// the merger's validity check downstream.
    pub fn from_value(v: &Value) -> Self {
        Self {
            hub_id: v.get("hubId").and_then(Value::as_str).map(str::to_string),
            hub_name: v.get("hubName").and_then(Value::as_str).map(str::to_string),
            pricing: v.get("pricing").cloned().unwrap_or(Value::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// Performance metrics
// ---------------------------------------------------------------------------

/// Host-side enrichment figures, consumed read-only by the revenue projector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceMetrics {
    pub occurrences_per_month: Option<f64>,
    pub impressions_per_month: Option<f64>,
    pub audience_size: Option<f64>,
}

// ---------------------------------------------------------------------------
// Display lines
// ---------------------------------------------------------------------------

/// Amount cell of a display line: a number, the contact marker, or nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayAmount {
    Value(f64),
    Contact,
    Unpriced,
}

impl Serialize for DisplayAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DisplayAmount::Value(v) => serializer.serialize_f64(*v),
            DisplayAmount::Contact => serializer.serialize_str("contact"),
            DisplayAmount::Unpriced => serializer.serialize_none(),
        }
    }
}

/// One renderable price line. Currency symbols are the caller's concern; this
/// engine supplies only the amount and the unit suffix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayLine {
    pub amount: DisplayAmount,
    pub unit_label: &'static str,
}

impl DisplayLine {
    /// The sentinel line for records no known field or model explains.
    pub fn unavailable() -> Self {
        Self {
            amount: DisplayAmount::Unpriced,
            unit_label: "N/A",
        }
    }
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// Outcome of a revenue projection. The number alone is ambiguous: a true
/// zero-revenue opportunity and a contact-priced one both project 0.0, so
/// callers must read `model` alongside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub model: Option<PricingModel>,
    pub monthly_revenue: f64,
}

impl Projection {
    pub fn projectable(&self) -> bool {
        self.model.is_some_and(|m| m != PricingModel::Contact)
    }
}
