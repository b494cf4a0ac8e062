pub mod fare_writer;
pub mod trip_reader;
