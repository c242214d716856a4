//! Torrent field names accepted by `torrent-get`.

use std::fmt;

use serde::{Serialize, Serializer};

macro_rules! field_table {
    ($($variant:ident => $name:literal,)*) => {
        /// A torrent field that can be requested through the `fields` argument.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)] // rationale: these are the same fields as in Transmission RPC
        pub enum Field {
            $($variant,)*
        }

        impl Field {
            /// Every field, in table order.
            pub const ALL: &'static [Field] = &[$(Field::$variant,)*];

            /// The wire name of the field.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Field::$variant => $name,)*
                }
            }
        }
    };
}

field_table! {
    ActivityDate => "activityDate",
    AddedDate => "addedDate",
    BandwidthPriority => "bandwidthPriority",
    Comment => "comment",
    CorruptEver => "corruptEver",
    Creator => "creator",
    DateCreated => "dateCreated",
    DesiredAvailable => "desiredAvailable",
    DoneDate => "doneDate",
    DownloadDir => "downloadDir",
    DownloadedEver => "downloadedEver",
    DownloadLimit => "downloadLimit",
    DownloadLimited => "downloadLimited",
    EditDate => "editDate",
    Error => "error",
    ErrorString => "errorString",
    Eta => "eta",
    EtaIdle => "etaIdle",
    Files => "files",
    FileStats => "fileStats",
    HashString => "hashString",
    HaveUnchecked => "haveUnchecked",
    HaveValid => "haveValid",
    HonorsSessionLimits => "honorsSessionLimits",
    Id => "id",
    IsFinished => "isFinished",
    IsPrivate => "isPrivate",
    IsStalled => "isStalled",
    Labels => "labels",
    LeftUntilDone => "leftUntilDone",
    MagnetLink => "magnetLink",
    ManualAnnounceTime => "manualAnnounceTime",
    MaxConnectedPeers => "maxConnectedPeers",
    MetadataPercentComplete => "metadataPercentComplete",
    Name => "name",
    PeerLimit => "peer-limit",
    Peers => "peers",
    PeersConnected => "peersConnected",
    PeersFrom => "peersFrom",
    PeersGettingFromUs => "peersGettingFromUs",
    PeersSendingToUs => "peersSendingToUs",
    PercentDone => "percentDone",
    Pieces => "pieces",
    PieceCount => "pieceCount",
    PieceSize => "pieceSize",
    Priorities => "priorities",
    QueuePosition => "queuePosition",
    RateDownload => "rateDownload",
    RateUpload => "rateUpload",
    RecheckProgress => "recheckProgress",
    SecondsDownloading => "secondsDownloading",
    SecondsSeeding => "secondsSeeding",
    SeedIdleLimit => "seedIdleLimit",
    SeedIdleMode => "seedIdleMode",
    SeedRatioLimit => "seedRatioLimit",
    SeedRatioMode => "seedRatioMode",
    SizeWhenDone => "sizeWhenDone",
    StartDate => "startDate",
    Status => "status",
    Trackers => "trackers",
    TrackerStats => "trackerStats",
    TotalSize => "totalSize",
    TorrentFile => "torrentFile",
    UploadedEver => "uploadedEver",
    UploadLimit => "uploadLimit",
    UploadLimited => "uploadLimited",
    UploadRatio => "uploadRatio",
    Wanted => "wanted",
    Webseeds => "webseeds",
    WebseedsSendingToUs => "webseedsSendingToUs",
}

/// Fields requested when listing every torrent.
pub const SUMMARY_FIELDS: &[Field] = &[
    Field::Id,
    Field::Name,
    Field::HashString,
    Field::Status,
    Field::Comment,
    Field::Error,
    Field::ErrorString,
    Field::IsFinished,
    Field::LeftUntilDone,
    Field::PercentDone,
    Field::Eta,
    Field::SizeWhenDone,
    Field::StartDate,
    Field::UploadRatio,
    Field::TotalSize,
];

/// Fields requested when fetching a single torrent.
pub const DETAIL_FIELDS: &[Field] = &[
    Field::Id,
    Field::Name,
    Field::HashString,
    Field::Status,
    Field::ErrorString,
    Field::AddedDate,
    Field::DownloadDir,
    Field::PercentDone,
    Field::Peers,
    Field::TotalSize,
    Field::RateDownload,
    Field::RateUpload,
    Field::UploadRatio,
    Field::Files,
    Field::FileStats,
];

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
