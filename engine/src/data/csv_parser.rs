use crate::error::EngineError;
use csv::{ReaderBuilder, StringRecord};
use shared::models::Candle;
use shared::utils::validate_price;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct CsvCandleLoader;

impl CsvCandleLoader {
    // CSV Header: timestamp,open,high,low,close,volume
    // Example Row: 1700000000000,37000.5,37100.0,36950.2,37050.1,1234.56
    // timestamp is epoch milliseconds, the exchange kline layout.
    pub fn load_candles_from_csv(file_path: &Path) -> Result<Vec<Candle>, EngineError> {
        let file = File::open(file_path)?;
        Self::load_candles(BufReader::new(file))
    }

    pub fn load_candles<R: Read>(reader: R) -> Result<Vec<Candle>, EngineError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();

        let mut candles = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2; // header is line 1

            let timestamp_str = Self::get_field(&record, &headers, "timestamp", line)?;
            let timestamp = timestamp_str.parse::<i64>().map_err(|e| {
                EngineError::CsvDataFormatError(format!("Error parsing 'timestamp' at line {}: '{}': {}", line, timestamp_str, e))
            })?;

            let open = Self::parse_price(&record, &headers, "open", line)?;
            let high = Self::parse_price(&record, &headers, "high", line)?;
            let low = Self::parse_price(&record, &headers, "low", line)?;
            let close = Self::parse_price(&record, &headers, "close", line)?;

            let volume = Self::parse_number(&record, &headers, "volume", line)?;
            if !(volume.is_finite() && volume >= 0.0) {
                return Err(EngineError::CsvDataFormatError(format!(
                    "Error parsing 'volume' at line {}: volume must be finite and non-negative, got {}",
                    line, volume
                )));
            }

            candles.push(Candle { timestamp, open, high, low, close, volume });
        }
        Ok(candles)
    }

    fn parse_price(record: &StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<f64, EngineError> {
        let value = Self::parse_number(record, headers, name, line)?;
        validate_price(value).ok_or_else(|| {
            EngineError::CsvDataFormatError(format!(
                "Error parsing '{}' at line {}: price must be positive, got {}",
                name, line, value
            ))
        })
    }

    fn parse_number(record: &StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<f64, EngineError> {
        let raw = Self::get_field(record, headers, name, line)?;
        raw.parse::<f64>().map_err(|e| {
            EngineError::CsvDataFormatError(format!("Error parsing '{}' at line {}: '{}': {}", name, line, raw, e))
        })
    }

    // Fields are looked up by header name so column order does not matter.
    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<&'a str, EngineError> {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|pos| record.get(pos))
            .ok_or_else(|| EngineError::CsvDataFormatError(format!("Missing '{}' field in CSV record at line {}", name, line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_candles_from_csv_valid_data() {
        let csv_content = "\
timestamp,open,high,low,close,volume
1700000000000,100.0,101.5,99.5,101.0,1500.25
1700000060000,101.0,102.0,100.0,100.5,900";
        let tmp_file = create_test_csv(csv_content);
        let candles = CsvCandleLoader::load_candles_from_csv(tmp_file.path()).unwrap();

        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].timestamp, 1_700_000_000_000);
        assert_eq!(candles[0].high, 101.5);
        assert_eq!(candles[0].volume, 1500.25);
        assert_eq!(candles[1].close, 100.5);
    }

    #[test]
    fn test_columns_matched_by_name() {
        let csv_content = "close,volume,timestamp,open,low,high\n2.0,5,1,1.5,1.0,2.5";
        let candles = CsvCandleLoader::load_candles(csv_content.as_bytes()).unwrap();
        assert_eq!(candles[0], Candle { timestamp: 1, open: 1.5, high: 2.5, low: 1.0, close: 2.0, volume: 5.0 });
    }

    #[test]
    fn test_load_candles_from_csv_empty_file() {
        let tmp_file = create_test_csv("timestamp,open,high,low,close,volume"); // Only header
        let candles = CsvCandleLoader::load_candles_from_csv(tmp_file.path()).unwrap();
        assert!(candles.is_empty());
    }

    #[test]
    fn test_missing_field() {
        let csv_content = "timestamp,open,high,low,close\n1,1.0,1.0,1.0,1.0";
        let err = CsvCandleLoader::load_candles(csv_content.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Missing 'volume' field"));
    }

    #[test]
    fn test_invalid_number() {
        let csv_content = "timestamp,open,high,low,close,volume\n1,abc,1.0,1.0,1.0,1.0";
        let err = CsvCandleLoader::load_candles(csv_content.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::CsvDataFormatError(_)));
        assert!(err.to_string().contains("Error parsing 'open' at line 2"));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let csv_content = "timestamp,open,high,low,close,volume\n1,1.0,1.0,1.0,0,1.0";
        let err = CsvCandleLoader::load_candles(csv_content.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'close'"));
    }

    #[test]
    fn test_negative_volume_rejected() {
        let csv_content = "timestamp,open,high,low,close,volume\n1,1.0,1.0,1.0,1.0,-4";
        let err = CsvCandleLoader::load_candles(csv_content.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_infinite_volume_rejected() {
        let csv_content = "timestamp,open,high,low,close,volume\n1,1.0,1.0,1.0,1.0,inf";
        let err = CsvCandleLoader::load_candles(csv_content.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'volume' at line 2"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CsvCandleLoader::load_candles_from_csv(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, EngineError::IoError { .. }));
    }
}
