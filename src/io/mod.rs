mod instances;
pub use instances::InstanceBatch;
pub use instances::InstancesReader;
pub use instances::InstancesWriter;
