/*!

This is the long-form manual for `topsis_engine` and the `topsis` command line program.

## The method

TOPSIS ranks a set of alternatives (phones, suppliers, sites, ...) that are described
by several numeric criteria. Each criterion has a weight and an impact:
* `+` (benefit): a higher value is better, for example the storage of a phone
* `-` (cost): a lower value is better, for example its price

The values of each criterion are divided by the Euclidean norm of their column, then
multiplied by the weight of the criterion (the weights are rescaled to sum to 1).
In this space, the ideal best alternative takes the best value of every criterion and
the ideal worst alternative the worst value. The score of an alternative is its
relative closeness to the ideal:

```text
score = distance to worst / (distance to best + distance to worst)
```

The score is between 0 and 1. The best alternative gets the rank 1.

Degenerate inputs are accepted:
- a criterion in which every alternative has the value 0 does not contribute to the scores
- a criterion with the same value for every alternative does not change the ranking
- if all the alternatives are identical, they all get the score 0.5

Tied alternatives share the largest rank of their group: the scores
`0.9, 0.5, 0.5, 0.1` are ranked `1, 3, 3, 4`.
The ranks compare the scores rounded to 6 decimals, the precision at which they are
published.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values
* `excel` Excel spreadsheets (.xlsx)

In both formats, the first row is a header and the first column contains the names of
the alternatives. Every other column is a criterion and must only contain numbers.
At least two criteria are required.

```text
Alternative,Criterion 1,Criterion 2,Criterion 3
A1,250,16,12
A2,200,20,8
A3,300,12,15
A4,275,14,10
```

A cell that cannot be read as a number stops the analysis with its position: empty
cells are not replaced by zeros.

For Excel files, the first worksheet is read unless a worksheet name is provided.

## Weights and impacts

Weights and impacts are comma-separated lists with one entry per criterion:

```bash
topsis -i sample_data.csv --weights "1,1,1" --impacts "+,-,-"
```

Weights must be non-negative numbers and must not all be zero. They do not need to sum
to 1.

## Outputs

The rankings are printed on the standard output. The input table, extended with the
`Topsis Score` (rounded to 6 decimals) and `Rank` columns, is written as CSV to the path
given with `--out` (or to the standard output with `--out stdout`). A JSON summary with
statistics and the ideal solutions can be written with `--summary`.

A sample input file can be generated with `--write-sample sample_data.csv`.

## Configuration

All the options can also be stored in a JSON file passed with `--config`. The options
on the command line take precedence over the content of the file.

```json
{
  "outputSettings": {
    "analysisName": "Phone selection",
    "outputPath": "topsis_results.csv",
    "summaryPath": "topsis_summary.json"
  },
  "inputSource": {
    "provider": "csv",
    "filePath": "sample_data.csv"
  },
  "weights": "1,1,1",
  "impacts": "+,-,-"
}
```

The `filePath` of the input and the output paths are relative to the directory of the
configuration file. `provider` is `csv` or `excel`; for Excel files, `excelWorksheetName`
selects the worksheet.

 */
