use crate::{
    core::{ConfigurationError, ParseError, ProblemInstance, Proposition, Variable},
    revision::{RevisionOperator, VarWeights, Weighted},
};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    io::{Read, Write},
};

const TAG_SATISFIABILITY: &str = "satisfiability";
const TAG_HAMMING: &str = "hamming distance";
const TAG_WEIGHTED_HAMMING: &str = "weighted hamming distance";
const TAG_ORDERED_SETS: &str = "ordered sets";

#[derive(Debug, Serialize, Deserialize)]
struct InstanceRecord {
    initial: Vec<String>,
    target: String,
    operator: OperatorRecord,
}

// The tagged operator record; only the fields of the tagged policy are
// present.
#[derive(Debug, Serialize, Deserialize)]
struct OperatorRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weights: Option<BTreeMap<String, usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sentences: Option<Vec<String>>,
}

/// A batch of problem instances read from a JSON document.
///
/// Records whose sentences failed to parse are skipped and reported by index
/// rather than failing the batch.
pub struct InstanceBatch {
    instances: Vec<ProblemInstance>,
    skipped: Vec<(usize, ParseError)>,
}

impl InstanceBatch {
    /// Returns the well-formed instances of the batch.
    pub fn instances(&self) -> &[ProblemInstance] {
        &self.instances
    }

    /// Consumes the batch, returning its well-formed instances.
    pub fn into_instances(self) -> Vec<ProblemInstance> {
        self.instances
    }

    /// Returns the indexes of the skipped records and the parse errors that
    /// caused them.
    pub fn skipped(&self) -> &[(usize, ParseError)] {
        &self.skipped
    }
}

/// Reads batches of problem instances from their JSON form.
///
/// A batch is an array of records `{"initial": [..], "target": "..",
/// "operator": {"name": ..}}`, the operator being one of the tagged records
/// `{"name": "satisfiability"}`, `{"name": "hamming distance"}`,
/// `{"name": "weighted hamming distance", "weights": {..}}` or
/// `{"name": "ordered sets", "sentences": [..]}`.
#[derive(Default)]
pub struct InstancesReader;

impl InstancesReader {
    /// Reads a batch of instances.
    ///
    /// Sentence parse errors are recoverable: the offending record is skipped
    /// and reported by index, unless every record is unusable. Configuration
    /// errors (unknown operator tag, invalid weight table) fail the whole
    /// batch.
    pub fn read<R>(&self, reader: R) -> Result<InstanceBatch>
    where
        R: Read,
    {
        let context = "while reading an instance batch";
        let records: Vec<InstanceRecord> = serde_json::from_reader(reader).context(context)?;
        let n_records = records.len();
        let mut instances = Vec::new();
        let mut skipped = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            let operator = decode_operator(&record.operator)
                .with_context(|| format!("in the record at index {}", index))
                .context(context)?;
            match decode_sentences(&record) {
                Ok((initial, target)) => {
                    instances.push(ProblemInstance::new(initial, target, operator));
                }
                Err(e) => skipped.push((index, e)),
            }
        }
        if instances.is_empty() && n_records > 0 {
            return Err(anyhow!("no record of the batch could be parsed")).context(context);
        }
        Ok(InstanceBatch { instances, skipped })
    }
}

fn decode_operator(record: &OperatorRecord) -> Result<RevisionOperator> {
    match record.name.as_str() {
        TAG_SATISFIABILITY => Ok(RevisionOperator::Satisfiability),
        TAG_HAMMING => Ok(RevisionOperator::HammingDistance),
        TAG_WEIGHTED_HAMMING => {
            let mut weights = VarWeights::new();
            for (name, weight) in record.weights.iter().flatten() {
                let var = Variable::make(name).map_err(|_| {
                    ConfigurationError::InvalidWeightVariable(name.clone())
                })?;
                weights.add(Weighted::new(var, *weight));
            }
            Ok(RevisionOperator::WeightedHammingDistance(weights))
        }
        TAG_ORDERED_SETS => {
            let spheres = record
                .sentences
                .iter()
                .flatten()
                .map(|text| {
                    Proposition::parse(text)
                        .with_context(|| format!(r#"while parsing the sphere "{}""#, text))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(RevisionOperator::OrderedSets(spheres))
        }
        unknown => Err(ConfigurationError::UnknownOperatorTag(unknown.to_string()).into()),
    }
}

fn decode_sentences(
    record: &InstanceRecord,
) -> Result<(std::collections::BTreeSet<Proposition>, Proposition), ParseError> {
    let initial = record
        .initial
        .iter()
        .map(|text| Proposition::parse(text))
        .collect::<Result<_, _>>()?;
    let target = Proposition::parse(&record.target)?;
    Ok((initial, target))
}

/// Writes batches of problem instances using the same JSON form as
/// [`InstancesReader`].
///
/// Sentences are serialized with [`Proposition::to_parsable_string`]; reading
/// them back yields truth-table-equivalent formulas.
#[derive(Default)]
pub struct InstancesWriter;

impl InstancesWriter {
    /// Writes a batch of instances.
    pub fn write(&self, writer: &mut dyn Write, instances: &[ProblemInstance]) -> Result<()> {
        let records = instances.iter().map(encode_instance).collect::<Vec<_>>();
        serde_json::to_writer_pretty(writer, &records)
            .context("while writing an instance batch")
    }
}

fn encode_instance(instance: &ProblemInstance) -> InstanceRecord {
    InstanceRecord {
        initial: instance
            .initial_belief_state()
            .iter()
            .map(Proposition::to_parsable_string)
            .collect(),
        target: instance.target_belief_state().to_parsable_string(),
        operator: encode_operator(instance.operator()),
    }
}

fn encode_operator(operator: &RevisionOperator) -> OperatorRecord {
    let (name, weights, sentences) = match operator {
        RevisionOperator::Satisfiability => (TAG_SATISFIABILITY, None, None),
        RevisionOperator::HammingDistance => (TAG_HAMMING, None, None),
        RevisionOperator::WeightedHammingDistance(var_weights) => (
            TAG_WEIGHTED_HAMMING,
            Some(
                var_weights
                    .iter()
                    .map(|w| (w.thing().name().to_string(), w.weight()))
                    .collect(),
            ),
            None,
        ),
        RevisionOperator::OrderedSets(spheres) => (
            TAG_ORDERED_SETS,
            None,
            Some(
                spheres
                    .iter()
                    .map(Proposition::to_parsable_string)
                    .collect(),
            ),
        ),
    };
    OperatorRecord {
        name: name.to_string(),
        weights,
        sentences,
    }
}
