//! Bit packing and unpacking of Snowflake IDs

use chrono::{DateTime, Utc};

use crate::config::SnowflakeConfig;
use crate::error::SnowflakeError;

/// Decoded fields of a Snowflake ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnowflakeParts {
    /// Absolute timestamp in milliseconds since the Unix epoch
    pub timestamp_ms: u64,
    pub datacenter_id: u8,
    pub worker_id: u8,
    pub sequence: u16,
}

impl SnowflakeParts {
    /// Timestamp as a UTC date-time, if it is representable
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.timestamp_ms).ok()?;
        DateTime::<Utc>::from_timestamp_millis(millis)
    }
}

/// Encoder/decoder for one ID layout and epoch
#[derive(Debug, Copy, Clone)]
pub struct SnowflakeCodec {
    config: SnowflakeConfig,
}

impl SnowflakeCodec {
    /// Create a codec for the given configuration
    pub fn new(config: SnowflakeConfig) -> Self {
        Self { config }
    }

    /// Pack the four fields into an ID.
    ///
    /// `timestamp_ms` is absolute; it must not precede the epoch nor exceed
    /// the timestamp field.
    pub fn encode(
        &self,
        timestamp_ms: u64,
        datacenter_id: u8,
        worker_id: u8,
        sequence: u16,
    ) -> Result<u64, SnowflakeError> {
        let offset = self.timestamp_offset(timestamp_ms)?;
        let datacenter_id = check_component(
            "datacenter_id",
            datacenter_id as u64,
            self.config.max_datacenter_id(),
        )?;
        let worker_id = check_component("worker_id", worker_id as u64, self.config.max_worker_id())?;
        let sequence = check_component("sequence", sequence as u64, self.config.max_sequence())?;

        Ok((offset << self.config.timestamp_shift())
            | (datacenter_id << self.config.datacenter_shift())
            | (worker_id << self.config.worker_shift())
            | sequence)
    }

    /// Pack previously decoded parts
    pub fn encode_parts(&self, parts: SnowflakeParts) -> Result<u64, SnowflakeError> {
        self.encode(
            parts.timestamp_ms,
            parts.datacenter_id,
            parts.worker_id,
            parts.sequence,
        )
    }

    /// Absolute timestamp component of an ID
    #[inline(always)]
    pub fn timestamp(&self, id: u64) -> u64 {
        ((id >> self.config.timestamp_shift()) & self.config.max_timestamp_offset())
            + self.config.epoch()
    }

    #[inline(always)]
    pub fn datacenter_id(&self, id: u64) -> u8 {
        ((id >> self.config.datacenter_shift()) & self.config.max_datacenter_id()) as u8
    }

    #[inline(always)]
    pub fn worker_id(&self, id: u64) -> u8 {
        ((id >> self.config.worker_shift()) & self.config.max_worker_id()) as u8
    }

    #[inline(always)]
    pub fn sequence(&self, id: u64) -> u16 {
        (id & self.config.max_sequence()) as u16
    }

    /// Split an ID into its components
    #[inline]
    pub fn decode(&self, id: u64) -> SnowflakeParts {
        SnowflakeParts {
            timestamp_ms: self.timestamp(id),
            datacenter_id: self.datacenter_id(id),
            worker_id: self.worker_id(id),
            sequence: self.sequence(id),
        }
    }

    /// Offset of `timestamp_ms` from the epoch, if it fits the timestamp field
    pub(crate) fn timestamp_offset(&self, timestamp_ms: u64) -> Result<u64, SnowflakeError> {
        let max = self.config.max_timestamp_offset();
        match timestamp_ms.checked_sub(self.config.epoch()) {
            Some(offset) if offset <= max => Ok(offset),
            _ => Err(SnowflakeError::TimestampOutOfRange {
                timestamp: timestamp_ms,
                epoch: self.config.epoch(),
                max,
            }),
        }
    }
}

fn check_component(field: &'static str, value: u64, max: u64) -> Result<u64, SnowflakeError> {
    if value > max {
        return Err(SnowflakeError::InvalidComponent { field, value, max });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_known_layout() {
        let config = SnowflakeConfig::builder().epoch(0).build();
        let codec = SnowflakeCodec::new(config);

        let id = codec.encode(0x1234567, 21, 9, 123).unwrap();
        assert_eq!(id, (0x1234567 << 22) | (21 << 17) | (9 << 12) | 123);

        assert_eq!(codec.timestamp(id), 0x1234567);
        assert_eq!(codec.datacenter_id(id), 21);
        assert_eq!(codec.worker_id(id), 9);
        assert_eq!(codec.sequence(id), 123);
    }

    #[test]
    fn test_round_trip_boundaries_and_samples() {
        let config = SnowflakeConfig::default();
        let codec = SnowflakeCodec::new(config);
        let epoch = config.epoch();
        let last = epoch + config.max_timestamp_offset();

        let mut cases = vec![
            SnowflakeParts { timestamp_ms: epoch, datacenter_id: 0, worker_id: 0, sequence: 0 },
            SnowflakeParts { timestamp_ms: last, datacenter_id: 31, worker_id: 31, sequence: 4095 },
            SnowflakeParts { timestamp_ms: epoch + 1, datacenter_id: 31, worker_id: 0, sequence: 1 },
        ];

        let mut rng = rand::rng();
        for _ in 0..200 {
            cases.push(SnowflakeParts {
                timestamp_ms: rng.random_range(epoch..=last),
                datacenter_id: rng.random_range(0..=31),
                worker_id: rng.random_range(0..=31),
                sequence: rng.random_range(0..=4095),
            });
        }

        for parts in cases {
            let id = codec.encode_parts(parts).unwrap();
            assert_eq!(id >> 63, 0, "top bit must stay clear");
            assert_eq!(codec.decode(id), parts);
        }
    }

    #[test]
    fn test_timestamp_out_of_range() {
        let config = SnowflakeConfig::builder().epoch(1000).build();
        let codec = SnowflakeCodec::new(config);

        let err = codec.encode(999, 0, 0, 0).unwrap_err();
        assert!(matches!(
            err,
            SnowflakeError::TimestampOutOfRange { timestamp: 999, epoch: 1000, .. }
        ));

        let too_late = 1000 + config.max_timestamp_offset() + 1;
        assert!(codec.encode(too_late, 0, 0, 0).is_err());
    }

    #[test]
    fn test_component_out_of_range() {
        let codec = SnowflakeCodec::new(SnowflakeConfig::default());
        let epoch = SnowflakeConfig::default().epoch();

        assert_eq!(
            codec.encode(epoch, 32, 0, 0),
            Err(SnowflakeError::InvalidComponent { field: "datacenter_id", value: 32, max: 31 })
        );
        assert_eq!(
            codec.encode(epoch, 0, 40, 0),
            Err(SnowflakeError::InvalidComponent { field: "worker_id", value: 40, max: 31 })
        );
        assert_eq!(
            codec.encode(epoch, 0, 0, 4096),
            Err(SnowflakeError::InvalidComponent { field: "sequence", value: 4096, max: 4095 })
        );
    }

    #[test]
    fn test_datetime() {
        let parts = SnowflakeParts {
            timestamp_ms: 1546300800000,
            datacenter_id: 0,
            worker_id: 0,
            sequence: 0,
        };
        assert_eq!(
            parts.datetime().unwrap().to_rfc3339(),
            "2019-01-01T00:00:00+00:00"
        );
    }
}
